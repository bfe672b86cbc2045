//! `streettech process <url>` – validate and resolve a URL.

use anyhow::Result;
use streettech_core::session::Session;
use streettech_core::video::VideoInfo;

pub(super) fn print_video(info: &VideoInfo) {
    println!("{}", info.title);
    println!("  ID:        {}", info.id);
    println!("  Duration:  {}", info.duration);
    if let Some(views) = &info.views {
        println!("  Views:     {views}");
    }
    if let Some(date) = &info.upload_date {
        println!("  Uploaded:  {date}");
    }
    println!("  Thumbnail: {}", info.thumbnail);
    let qualities: Vec<&str> = info.available_qualities.iter().map(|q| q.as_str()).collect();
    println!("  Qualities: {}", qualities.join(", "));
}

pub async fn run_process(session: &Session, url: &str) -> Result<()> {
    let info = session.process(url).await?;
    print_video(&info);
    Ok(())
}
