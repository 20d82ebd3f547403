//! Clipboard shared by all documents

/// Clipboard backed by the system clipboard, with an in-process fallback
/// for platforms where `arboard` cannot connect.
#[derive(Debug, Default)]
pub struct Clipboard {
    use_system: bool,
    internal: String,
}

impl Clipboard {
    /// Clipboard that also talks to the system clipboard
    pub fn system() -> Self {
        Self {
            use_system: true,
            internal: String::new(),
        }
    }

    /// Clipboard that stays inside the process
    #[cfg(test)]
    pub fn internal() -> Self {
        Self::default()
    }

    pub fn set_text(&mut self, text: &str) {
        self.internal = text.to_string();

        if self.use_system {
            match arboard::Clipboard::new() {
                Ok(mut cb) => {
                    if let Err(e) = cb.set_text(text) {
                        tracing::warn!("Failed to set system clipboard: {}", e);
                    }
                }
                Err(e) => tracing::warn!("System clipboard unavailable: {}", e),
            }
        }
    }

    /// System clipboard text if available, otherwise the last text set here
    pub fn text(&self) -> Option<String> {
        let system = if self.use_system {
            arboard::Clipboard::new()
                .ok()
                .and_then(|mut cb| cb.get_text().ok())
                .filter(|t| !t.is_empty())
        } else {
            None
        };

        system.or_else(|| {
            if self.internal.is_empty() {
                None
            } else {
                Some(self.internal.clone())
            }
        })
    }
}
