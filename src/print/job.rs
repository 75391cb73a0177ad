use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;

use image::{ImageFormat, RgbaImage};
use uuid::Uuid;

use crate::error::{PrintError, PrintResult};

/// What the spooler accepted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobReceipt {
    pub id: Uuid,
    /// Temp file handed to the spooler; removed once the spooler exited
    pub spool_file: PathBuf,
    /// Whatever the spooler printed on stdout (e.g. `request id is ...`)
    pub message: String,
}

/// A rendered page on its way to the operating system's print spooler
#[derive(Debug)]
pub struct PrintJob {
    id: Uuid,
    command: String,
    page: RgbaImage,
}

impl PrintJob {
    pub fn new(command: impl Into<String>, page: RgbaImage) -> Self {
        Self {
            id: Uuid::new_v4(),
            command: command.into(),
            page,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Encode the page into a temp file and hand it to the spooler. Blocks
    /// until the spooler command exits; the temp file is deleted on return.
    pub fn submit(self) -> PrintResult<JobReceipt> {
        if self.page.width() == 0 || self.page.height() == 0 {
            return Err(PrintError::EmptyPage);
        }

        let mut spool = tempfile::Builder::new()
            .prefix("printer-app-")
            .suffix(".png")
            .tempfile()?;
        self.page.write_to(&mut spool, ImageFormat::Png)?;
        spool.flush()?;

        log::info!("Submitting print job {} via `{}`", self.id, self.command);
        let output = Command::new(&self.command).arg(spool.path()).output()?;

        if !output.status.success() {
            return Err(PrintError::Spooler {
                command: self.command,
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
            });
        }

        Ok(JobReceipt {
            id: self.id,
            spool_file: spool.path().to_path_buf(),
            message: String::from_utf8_lossy(&output.stdout).trim().to_owned(),
        })
    }

    /// Run [`Self::submit`] on a worker thread and report through `done`
    pub fn spawn<F>(self, done: F)
    where
        F: FnOnce(PrintResult<JobReceipt>) + Send + 'static,
    {
        std::thread::spawn(move || done(self.submit()));
    }
}

/// Write the page as PNG
pub fn save_png(page: &RgbaImage, path: &Path) -> PrintResult<()> {
    if page.width() == 0 || page.height() == 0 {
        return Err(PrintError::EmptyPage);
    }
    page.save_with_format(path, ImageFormat::Png)?;
    log::debug!("Wrote page {}x{} to {}", page.width(), page.height(), path.display());
    Ok(())
}
