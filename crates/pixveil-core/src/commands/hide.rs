use std::path::Path;

use crate::{CodecOptions, StegoError};

pub fn hide(
    media: &Path,
    write_to_file: &Path,
    data_file: &Path,
    password: Option<String>,
    options: CodecOptions,
) -> Result<(), StegoError> {
    crate::api::hide::prepare()
        .with_options(options)
        .with_image(media)
        .with_output(write_to_file)
        .with_file(data_file)
        .use_password(password)
        .execute()
}
