//! Presentation shell state
//!
//! Footer visibility, display geometry, modal info notices, and currency
//! formatting. This is the glue around the bridge, not part of settlement.

use crate::config::PresentationConfig;
use serde::{Deserialize, Serialize};

/// Width/height pair in pixels
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

/// A blocking modal notice surfaced to the player
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InfoNotice {
    pub title: String,
    pub content: String,
}

/// Footer and modal state for the embedded game
#[derive(Debug, Clone)]
pub struct WrapperView {
    config: PresentationConfig,
    footer_visible: bool,
    notice: Option<InfoNotice>,
}

impl WrapperView {
    pub fn new(config: PresentationConfig) -> Self {
        Self {
            config,
            footer_visible: true,
            notice: None,
        }
    }

    /// Full game display area
    pub fn display_size(&self) -> Size {
        Size {
            width: self.config.display_width,
            height: self.config.display_height,
        }
    }

    /// Footer strip below the game
    pub fn wrapper_size(&self) -> Size {
        Size {
            width: self.config.display_width,
            height: self.config.footer_height,
        }
    }

    pub fn footer_visible(&self) -> bool {
        self.footer_visible
    }

    pub fn show(&mut self) {
        self.footer_visible = true;
    }

    pub fn hide(&mut self) {
        self.footer_visible = false;
    }

    /// Surface a modal notice; it stays up until dismissed
    pub fn show_info(&mut self, notice: InfoNotice) {
        self.notice = Some(notice);
    }

    pub fn dismiss_info(&mut self) -> Option<InfoNotice> {
        self.notice.take()
    }

    pub fn current_notice(&self) -> Option<&InfoNotice> {
        self.notice.as_ref()
    }
}

/// Format integer minor units as a grouped major-unit amount with the
/// configured symbol, e.g. `123456` -> `$1,234.56`
pub fn format_currency(cents: i64, symbol: &str) -> String {
    let negative = cents < 0;
    let abs = cents.unsigned_abs();
    let major = abs / 100;
    let minor = abs % 100;

    let digits = major.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if negative { "-" } else { "" };
    format!("{}{}{}.{:02}", sign, symbol, grouped, minor)
}
