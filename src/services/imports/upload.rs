use actix_multipart::Multipart;
use futures_util::StreamExt;

use crate::models::ErrorCode;

/// 上传读取错误
#[derive(Debug)]
pub enum UploadError {
    Missing,
    TooLarge(usize),
    Read(String),
}

impl UploadError {
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::Missing => ErrorCode::ImportFileMissing,
            Self::TooLarge(_) => ErrorCode::ImportFileTooLarge,
            Self::Read(_) => ErrorCode::ImportFileDataInvalid,
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::Missing => "No file was uploaded in field 'file'".to_string(),
            Self::TooLarge(limit) => format!("File exceeds the maximum size of {limit} bytes"),
            Self::Read(msg) => format!("Failed to read uploaded file: {msg}"),
        }
    }
}

/// 读取 multipart 中名为 file 的字段
pub async fn read_file_field(
    payload: &mut Multipart,
    max_size: usize,
) -> Result<Vec<u8>, UploadError> {
    let mut file_bytes = Vec::new();
    let mut found = false;

    while let Some(item) = payload.next().await {
        let mut field = item.map_err(|e| UploadError::Read(e.to_string()))?;

        if field.name() != Some("file") {
            continue;
        }
        found = true;

        while let Some(chunk) = field.next().await {
            let data = chunk.map_err(|e| UploadError::Read(e.to_string()))?;
            if file_bytes.len() + data.len() > max_size {
                return Err(UploadError::TooLarge(max_size));
            }
            file_bytes.extend_from_slice(&data);
        }
    }

    if !found {
        return Err(UploadError::Missing);
    }

    Ok(file_bytes)
}
