#![forbid(unsafe_code)]

mod append;
mod normalize;
mod read;
mod remove;
mod reorder;

use super::{ItemContent, StoreError};

const MAX_TITLE_CHARS: usize = 200;

fn validate_content(content: &ItemContent) -> Result<(), StoreError> {
    if content.title_en.trim().is_empty() {
        return Err(StoreError::InvalidInput("title_en must not be empty"));
    }
    if content.title_en.chars().count() > MAX_TITLE_CHARS
        || content.title_ar.chars().count() > MAX_TITLE_CHARS
    {
        return Err(StoreError::InvalidInput("title is too long"));
    }
    Ok(())
}
