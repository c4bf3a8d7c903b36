use std::io::{IsTerminal, Write};
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

const FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Stderr spinner whose label can be updated while a batch runs. Falls back
/// to plain log lines when stderr is not a terminal.
pub struct ProgressLogger {
    message: Arc<watch::Sender<String>>,
    stop_sender: Option<mpsc::UnboundedSender<()>>,
    task_handle: Option<JoinHandle<()>>,
    interactive: bool,
}

impl ProgressLogger {
    pub fn new(message: String) -> Self {
        let (message, _) = watch::channel(message);

        Self {
            message: Arc::new(message),
            stop_sender: None,
            task_handle: None,
            interactive: std::io::stderr().is_terminal(),
        }
    }

    pub fn start(&mut self) {
        if !self.interactive {
            log::info!("{}", self.message.borrow().as_str());
            return;
        }

        let (stop_tx, mut stop_rx) = mpsc::unbounded_channel();
        let message = self.message.subscribe();

        let handle = tokio::spawn(async move {
            let mut frame = 0;
            let mut interval = tokio::time::interval(tokio::time::Duration::from_millis(120));

            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        let mut stderr = std::io::stderr();
                        let _ = write!(stderr, "\r\x1b[K{} {}", FRAMES[frame], message.borrow().as_str());
                        let _ = stderr.flush();
                        frame = (frame + 1) % FRAMES.len();
                    }
                    _ = stop_rx.recv() => {
                        break;
                    }
                }
            }
        });

        self.stop_sender = Some(stop_tx);
        self.task_handle = Some(handle);
    }

    pub fn set_message(&self, message: String) {
        if !self.interactive {
            log::info!("{}", message);
        }
        self.message.send_replace(message);
    }

    /// Callback suitable for the analysis pipeline's progress hook.
    pub fn progress_callback(&self) -> impl FnMut(usize, usize) + Send + 'static {
        let message = Arc::clone(&self.message);
        let interactive = self.interactive;

        move |current, total| {
            let text = format!("Analyzing issue {}/{}...", current, total);
            if !interactive {
                log::info!("{}", text);
            }
            message.send_replace(text);
        }
    }

    async fn halt(&mut self) {
        if let Some(sender) = self.stop_sender.take() {
            let _ = sender.send(());
        }

        if let Some(handle) = self.task_handle.take() {
            let _ = handle.await;
        }
    }

    pub async fn finish(&mut self, final_message: &str) {
        self.halt().await;
        Self::print_final("✅", final_message, self.interactive);
    }

    pub async fn fail(&mut self, error_message: &str) {
        self.halt().await;
        Self::print_final("❌", error_message, self.interactive);
    }

    fn print_final(symbol: &str, text: &str, interactive: bool) {
        let mut stderr = std::io::stderr();
        let _ = if interactive {
            writeln!(stderr, "\r\x1b[K{} {}", symbol, text)
        } else {
            writeln!(stderr, "{} {}", symbol, text)
        };
        let _ = stderr.flush();
    }
}
