//! Image acquisition
//!
//! Two paths produce the same artifact: a user-supplied file, or a
//! still captured from the local camera. The widget holds at most one
//! image at a time; acquiring a new one releases the previous preview.
//! The camera stream is held by a guard that stops it on every exit
//! path: photo taken, cancel, error, or drop.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use bytes::Bytes;
use image::ImageFormat;
use nokhwa::pixel_format::RgbFormat;
use nokhwa::utils::{CameraIndex, RequestedFormat, RequestedFormatType};
use nokhwa::Camera;
use tracing::debug;

use crate::api::ApiError;

/// A preview copy on disk, deleted when the handle is dropped
#[derive(Debug)]
pub struct PreviewHandle {
    path: PathBuf,
}

impl PreviewHandle {
    fn write(dir: &Path, extension: &str, data: &[u8]) -> Result<Self, ApiError> {
        let path = dir.join(format!("{}.{}", uuid::Uuid::new_v4(), extension));
        std::fs::write(&path, data)
            .map_err(|e| ApiError::invalid("image", format!("Could not write preview: {}", e)))?;
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for PreviewHandle {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

/// The single in-memory image artifact plus its preview
#[derive(Debug)]
pub struct CapturedImage {
    pub data: Bytes,
    pub filename: String,
    pub mime: String,
    preview: PreviewHandle,
}

impl CapturedImage {
    pub fn preview_path(&self) -> &Path {
        self.preview.path()
    }
}

/// An open camera stream. Dropping the session stops the stream, so
/// cancel is simply letting it go out of scope.
pub struct CameraSession {
    camera: Camera,
}

impl CameraSession {
    /// Request camera access and start the live stream
    pub fn open(index: u32) -> Result<Self, ApiError> {
        let requested =
            RequestedFormat::new::<RgbFormat>(RequestedFormatType::AbsoluteHighestResolution);
        let mut camera = Camera::new(CameraIndex::Index(index), requested)
            .map_err(|e| ApiError::MediaAccess(e.to_string()))?;
        camera
            .open_stream()
            .map_err(|e| ApiError::MediaAccess(e.to_string()))?;

        debug!("camera stream opened on device {}", index);
        Ok(Self { camera })
    }

    /// Snapshot one frame at the stream's native resolution and encode
    /// it as PNG. Consumes the session; the stream is released on
    /// return, success or not.
    pub fn take_photo(mut self) -> Result<Vec<u8>, ApiError> {
        let frame = self
            .camera
            .frame()
            .map_err(|e| ApiError::MediaAccess(e.to_string()))?;
        let decoded = frame
            .decode_image::<RgbFormat>()
            .map_err(|e| ApiError::MediaAccess(e.to_string()))?;

        debug!(
            "captured {}x{} frame from camera",
            decoded.width(),
            decoded.height()
        );

        let mut png = Vec::new();
        image::DynamicImage::ImageRgb8(decoded)
            .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
            .map_err(|_| ApiError::MediaAccess("Failed to create image blob".to_string()))?;

        Ok(png)
    }
}

impl Drop for CameraSession {
    fn drop(&mut self) {
        let _ = self.camera.stop_stream();
    }
}

/// Manages image acquisition and the current artifact
pub struct ImageCapture {
    captures_dir: PathBuf,
    current: Option<CapturedImage>,
}

impl ImageCapture {
    pub fn new(captures_dir: PathBuf) -> Self {
        Self {
            captures_dir,
            current: None,
        }
    }

    /// The current artifact, if one has been acquired
    pub fn image(&self) -> Option<&CapturedImage> {
        self.current.as_ref()
    }

    /// Upload path: take the image from a user-named file. The prior
    /// artifact is kept when the file is unreadable or not an image.
    pub fn set_from_file(&mut self, path: &Path) -> Result<(), ApiError> {
        let mime = mime_guess::from_path(path).first_or_octet_stream();
        if mime.type_().as_str() != "image" {
            return Err(ApiError::invalid("image", "Please choose an image file"));
        }

        let data = std::fs::read(path).map_err(|e| {
            ApiError::invalid("image", format!("Could not read image file: {}", e))
        })?;

        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().into_owned())
            .unwrap_or_else(|| "img".to_string());

        self.install(data, filename, mime.to_string(), &extension)
    }

    /// Capture path, step one: open the stream. Widget state is
    /// untouched until a photo is actually taken, so a denied camera or
    /// a cancel leaves any prior artifact in place.
    pub fn begin_capture(&self, index: u32) -> Result<CameraSession, ApiError> {
        CameraSession::open(index)
    }

    /// Capture path, step two: take the photo and install it
    pub fn complete_capture(&mut self, session: CameraSession) -> Result<(), ApiError> {
        let png = session.take_photo()?;
        self.install(png, "webcam-capture.png".to_string(), "image/png".to_string(), "png")
    }

    /// Drop the current artifact and release its preview
    pub fn clear(&mut self) {
        self.current = None;
    }

    fn install(
        &mut self,
        data: Vec<u8>,
        filename: String,
        mime: String,
        extension: &str,
    ) -> Result<(), ApiError> {
        let preview = PreviewHandle::write(&self.captures_dir, extension, &data)?;

        // the swap drops the superseded artifact, releasing its preview
        self.current = Some(CapturedImage {
            data: Bytes::from(data),
            filename,
            mime,
            preview,
        });
        Ok(())
    }
}
