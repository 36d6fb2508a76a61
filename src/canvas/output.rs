use std::{io::Cursor, path::Path};

use anyhow::Context as _;

use crate::{canvas::fit::CanvasResult, foundation::error::StoreResult};

pub fn ensure_parent_dir(path: &Path) -> StoreResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

impl CanvasResult {
    pub fn encode_png(&self) -> StoreResult<Vec<u8>> {
        let mut buf = Vec::new();
        self.image
            .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .context("encode png")?;
        Ok(buf)
    }

    pub fn save_png(&self, path: &Path) -> StoreResult<()> {
        ensure_parent_dir(path)?;
        image::save_buffer_with_format(
            path,
            self.image.as_raw(),
            self.image.width(),
            self.image.height(),
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .with_context(|| format!("write png '{}'", path.display()))?;
        tracing::info!(path = %path.display(), "wrote png");
        Ok(())
    }
}
