use std::path::PathBuf;

use chatdiary_core::upload::LocalImageRef;
use chatdiary_core::EntryKind;

use crate::commands::common::ClientSession;
use crate::error::CliError;

pub async fn run_upload(
    images: Vec<PathBuf>,
    position: &str,
    content: &str,
    api_url: Option<String>,
) -> Result<(), CliError> {
    let images = images
        .into_iter()
        .map(LocalImageRef::from)
        .collect::<Vec<_>>();
    let count = images.len();

    let session = ClientSession::open(api_url)?;
    let uploaded = session
        .view_model
        .send_images(
            EntryKind::Image,
            position,
            content,
            &images,
            &session.cancel,
        )
        .await;
    session.finish().await?;

    if uploaded != Some(true) {
        return Err(CliError::Request("image upload failed".to_string()));
    }

    println!("Uploaded {count} image(s)");
    Ok(())
}
