use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::{error, info};

use crate::media::{FrameDirectoryWriter, Media, Persist};
use crate::{CodecOptions, StegoEngine, StegoError};

use super::Password;

pub fn prepare() -> HideApi {
    HideApi::default()
}

#[derive(Default, Debug)]
pub struct HideApi {
    file: Option<PathBuf>,
    image: Option<PathBuf>,
    output: Option<PathBuf>,
    password: Password,
    options: CodecOptions,
}

impl HideApi {
    pub fn with_options(mut self, options: CodecOptions) -> Self {
        self.options = options;
        self
    }

    /// The file to hide, its name is hidden alongside its content
    pub fn with_file<A: AsRef<Path>>(mut self, data_file: A) -> Self {
        self.file = Some(data_file.as_ref().to_path_buf());
        self
    }

    /// The carrier, an image file or a directory of png frames
    pub fn with_image<A: AsRef<Path>>(mut self, image: A) -> Self {
        self.image = Some(image.as_ref().to_path_buf());
        self
    }

    /// Where the carrier with the hidden file goes, a png file or a directory for frames
    pub fn with_output<A: AsRef<Path>>(mut self, output: A) -> Self {
        self.output = Some(output.as_ref().to_path_buf());
        self
    }

    /// Set the password
    pub fn with_password(mut self, password: &str) -> Self {
        self.password = password.into();
        self
    }

    /// Set the password
    /// If `None` is passed, no password will be used, leads to no encryption used
    pub fn use_password<P: Into<Password>>(mut self, password: P) -> Self {
        self.password = password.into();
        self
    }

    pub fn execute(self) -> Result<(), StegoError> {
        let Some(file) = self.file else {
            return Err(StegoError::MissingFile);
        };
        let Some(image) = self.image else {
            return Err(StegoError::CarrierNotSet);
        };
        let Some(output) = self.output else {
            return Err(StegoError::TargetNotSet);
        };

        let content = read_payload(&file)?;
        let file_name = file
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let payload = match self.password.secret() {
            Some(password) => pixveil_cipher::encrypt_data(password, &content)
                .map_err(StegoError::EncryptionFailed)?,
            None => content,
        };

        let mut engine = StegoEngine::new(self.options, self.password.is_set());
        match Media::from_file(&image)? {
            Media::Image(mut frame) => {
                engine.hide_in_image(&mut frame, file_name.as_bytes(), &payload)?;
                frame.save_as(&output)?;
            }
            Media::Frames(mut frames) => {
                if is_same_location(&image, &output) {
                    error!("Refusing to write frames over the carrier {image:?}");
                    return Err(StegoError::OutputIsCarrier(output));
                }
                let mut writer = FrameDirectoryWriter::create(&output, frames.file_names())?;
                if let Err(e) =
                    engine.hide_in_frames(&mut frames, &mut writer, file_name.as_bytes(), &payload)
                {
                    error!("Hiding in frames failed, discarding {:?}: {e}", output);
                    writer.discard();
                    return Err(e);
                }
            }
        }
        info!("{file:?} hidden in {output:?}");

        Ok(())
    }
}

fn is_same_location(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

fn read_payload(file: &Path) -> Result<Vec<u8>, StegoError> {
    fs::read(file).map_err(|source| {
        error!("Cannot read {file:?}: {source}");
        if source.kind() == ErrorKind::NotFound {
            StegoError::FileNotFound(file.to_path_buf())
        } else {
            StegoError::FileOpenFailed {
                path: file.to_path_buf(),
                source,
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use image::{Rgb, RgbImage};
    use tempfile::tempdir;

    use crate::{StegoError, StegoStatus};

    #[test]
    fn illustrate_api_usage() {
        let temp_dir = tempdir().expect("Failed to create temporary directory");
        let carrier = temp_dir.path().join("carrier.png");
        RgbImage::from_fn(64, 64, |x, y| Rgb([x as u8 * 4, y as u8 * 4, 128]))
            .save(&carrier)
            .unwrap();
        let secret = temp_dir.path().join("secret.txt");
        fs::write(&secret, b"Hello, World!").unwrap();

        crate::api::hide::prepare()
            .with_file(&secret)
            .with_image(&carrier)
            .with_output(temp_dir.path().join("image-with-secret.png"))
            .execute()
            .expect("Failed to hide file in image");

        assert!(temp_dir.path().join("image-with-secret.png").is_file());
    }

    #[test]
    fn should_report_missing_inputs() {
        let temp_dir = tempdir().unwrap();

        let result = crate::api::hide::prepare()
            .with_file(temp_dir.path().join("missing.txt"))
            .with_image(temp_dir.path().join("missing.png"))
            .with_output(temp_dir.path().join("out.png"))
            .execute();
        assert_eq!(StegoStatus::of(&result), StegoStatus::FileNotFound);

        let result = crate::api::hide::prepare().with_image("a.png").execute();
        assert!(matches!(result, Err(StegoError::MissingFile)));
    }
}
