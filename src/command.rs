use crate::error::PrintResult;
use crate::placement::Nudge;
use crate::print::JobReceipt;

/// Everything the user (or a worker thread) can ask the app to do
#[derive(Debug)]
pub enum Command {
    /// Button press; the preview itself opens on the next frame
    OpenPrintPreview,
    /// Posted through the dispatcher to actually show the preview
    ShowPrintPreview,
    ClosePrintPreview,
    ClearDrawing,
    Nudge(Nudge),
    Print,
    SavePng,
    /// A spooler worker finished
    PrintFinished(PrintResult<JobReceipt>),
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::OpenPrintPreview => "OpenPrintPreview",
            Command::ShowPrintPreview => "ShowPrintPreview",
            Command::ClosePrintPreview => "ClosePrintPreview",
            Command::ClearDrawing => "ClearDrawing",
            Command::Nudge(_) => "Nudge",
            Command::Print => "Print",
            Command::SavePng => "SavePng",
            Command::PrintFinished(_) => "PrintFinished",
        }
    }
}
