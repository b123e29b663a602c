use std::io::{stdout, Write};

use banque_api::engine::TransferProgress;

pub struct TextProgressBar {
    width: usize,
}

impl TextProgressBar {
    pub fn new(width: usize) -> Self {
        Self { width }
    }

    fn line(&self, step: u8, total: u8, description: &str) -> String {
        let ratio = if total > 0 {
            (f32::from(step) / f32::from(total)).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let filled = (self.width as f32 * ratio) as usize;
        format!(
            "[{}{}] {:3.0}% - {}/{} - {}",
            "█".repeat(filled),
            "░".repeat(self.width - filled),
            ratio * 100.0,
            step,
            total,
            description
        )
    }

    pub fn render(&self, progress: &TransferProgress) {
        let line = self.line(
            progress.step_number(),
            TransferProgress::total_steps(),
            progress.description(),
        );
        print!("\x1B[2K\r{}", line);
        let _ = stdout().flush();
    }

    pub fn finish(&self) {
        println!();
    }
}
