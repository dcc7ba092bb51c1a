use std::path::Path;

use crate::{CodecOptions, StegoError};

pub fn capacity(media: &Path, options: CodecOptions) -> Result<u64, StegoError> {
    crate::api::capacity::prepare()
        .with_options(options)
        .with_image(media)
        .execute()
}
