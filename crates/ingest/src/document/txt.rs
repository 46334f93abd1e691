use super::{ExtractedText, ExtractionError};

pub fn extract_txt(bytes: &[u8]) -> Result<ExtractedText, ExtractionError> {
    // Try UTF-8 first, fall back to lossy conversion
    let text = String::from_utf8(bytes.to_vec())
        .unwrap_or_else(|_| String::from_utf8_lossy(bytes).into_owned());

    Ok(ExtractedText {
        text: text.trim().to_string(),
        num_pages: 1,
    })
}
