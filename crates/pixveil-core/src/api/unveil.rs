use std::fs;
use std::path::{Path, PathBuf};

use log::{error, info, warn};

use crate::media::Media;
use crate::{StegoEngine, StegoError};

use super::{Password, FALLBACK_FILE_NAME};

pub fn prepare() -> UnveilApi {
    UnveilApi::default()
}

#[derive(Default, Debug)]
pub struct UnveilApi {
    secret_media: Option<PathBuf>,
    output_folder: Option<PathBuf>,
    password: Password,
}

impl UnveilApi {
    /// This is the carrier that contains the data to be unveiled, an image or a frame directory
    pub fn from_secret_file(mut self, secret_media: impl AsRef<Path>) -> Self {
        self.secret_media = Some(secret_media.as_ref().to_path_buf());
        self
    }

    /// This is the folder where the unveiled file will be saved to
    pub fn into_output_folder(mut self, output_folder: impl AsRef<Path>) -> Self {
        self.output_folder = Some(output_folder.as_ref().to_path_buf());
        self
    }

    /// Set the password the data was encrypted with
    /// If `None` is passed, the data is expected to be unencrypted
    pub fn using_password<P: Into<Password>>(mut self, password: P) -> Self {
        self.password = password.into();
        self
    }

    /// Execute the unveil process, returns the path of the written file
    pub fn execute(self) -> Result<PathBuf, StegoError> {
        let Some(secret_media) = self.secret_media else {
            return Err(StegoError::CarrierNotSet);
        };
        let Some(output_folder) = self.output_folder else {
            return Err(StegoError::TargetNotSet);
        };

        let mut engine = StegoEngine::decoder(self.password.is_set());
        let unveiled = match Media::from_file(&secret_media)? {
            Media::Image(frame) => engine.unveil_from_image(&frame)?,
            Media::Frames(mut frames) => engine.unveil_from_frames(&mut frames)?,
        };

        let file_name = unveiled.safe_file_name().unwrap_or_else(|| {
            warn!("Hidden file name is unusable, falling back to {FALLBACK_FILE_NAME}");
            FALLBACK_FILE_NAME.to_string()
        });
        let content = match self.password.secret() {
            Some(password) => pixveil_cipher::decrypt_data(password, &unveiled.payload)
                .map_err(StegoError::DecryptionFailed)?,
            None => unveiled.payload,
        };

        fs::create_dir_all(&output_folder).map_err(|source| {
            error!("Cannot create output folder {output_folder:?}: {source}");
            StegoError::FileOpenFailed {
                path: output_folder.clone(),
                source,
            }
        })?;
        let target_file = output_folder.join(file_name);
        fs::write(&target_file, content).map_err(|source| {
            error!("Cannot write {target_file:?}: {source}");
            StegoError::FileOpenFailed {
                path: target_file.clone(),
                source,
            }
        })?;
        info!("unveiled {target_file:?} from {secret_media:?}");

        Ok(target_file)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use image::{Rgb, RgbImage};
    use tempfile::tempdir;

    #[test]
    fn illustrate_api_usage() {
        let temp_dir = tempdir().expect("Failed to create temporary directory");
        let carrier = temp_dir.path().join("carrier.png");
        let secret_image = temp_dir.path().join("secret.png");
        let secret = temp_dir.path().join("hello.txt");
        RgbImage::from_fn(48, 48, |x, y| Rgb([(x * y) as u8, 90, y as u8]))
            .save(&carrier)
            .unwrap();
        fs::write(&secret, b"Hello World").unwrap();
        crate::api::hide::prepare()
            .with_file(&secret)
            .with_image(&carrier)
            .with_output(&secret_image)
            .execute()
            .unwrap();

        let unveiled = crate::api::unveil::prepare()
            .from_secret_file(&secret_image)
            .into_output_folder(temp_dir.path().join("out"))
            .execute()
            .expect("Failed to unveil file from image");

        assert_eq!(unveiled, temp_dir.path().join("out").join("hello.txt"));
        assert_eq!(fs::read(unveiled).unwrap(), b"Hello World");
    }
}
