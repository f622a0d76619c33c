/// Channel for fatal, user-facing errors. Called at most once per run.
pub trait Alert {
    fn fatal(&mut self, message: &str);
}

/// Reports through the log and stderr.
pub struct LogAlert;

impl Alert for LogAlert {
    fn fatal(&mut self, message: &str) {
        tracing::error!("{message}");
        eprintln!("{message}");
    }
}

impl Alert for Vec<String> {
    fn fatal(&mut self, message: &str) {
        self.push(message.to_owned());
    }
}
