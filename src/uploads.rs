use chrono::Utc;
use std::path::Path;
use tokio::fs;

/// URL prefix under which uploaded photos are served.
pub const UPLOADS_PREFIX: &str = "/uploads/";

/// Writes `bytes` into `uploads_dir` as `<unix millis><original extension>` and
/// returns the public path of the new file.
pub async fn save_photo(
    uploads_dir: &Path,
    original_name: &str,
    bytes: &[u8],
) -> Result<String, std::io::Error> {
    fs::create_dir_all(uploads_dir).await?;

    let file_name = stored_file_name(Utc::now().timestamp_millis(), original_name);
    fs::write(uploads_dir.join(&file_name), bytes).await?;

    debug!("stored photo {} ({} bytes)", file_name, bytes.len());
    Ok(format!("{UPLOADS_PREFIX}{file_name}"))
}

fn stored_file_name(timestamp_millis: i64, original_name: &str) -> String {
    match Path::new(original_name).extension().and_then(|ext| ext.to_str()) {
        Some(ext) => format!("{timestamp_millis}.{ext}"),
        None => timestamp_millis.to_string(),
    }
}
