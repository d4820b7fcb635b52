//! # Receipt Rendering
//!
//! Turns a [`ReceiptView`] into a [`Snapshot`]: the bytes that get stored
//! with the receipt (as a `data:` URL) and written out on export.
//!
//! ## Layout
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        RENT RECEIPT                          │
//! │                                      Receipt No: RR-2025-001 │
//! │                                                              │
//! │  Received From:          Asha Verma                          │
//! │  Amount:                 ₹15,000                             │
//! │  Amount in Words:        Rupees Fifteen Thousand Only        │
//! │  For Rent of Property:   12 MG Road, Bengaluru               │
//! │  Rental Period:          01-31 Jan 2025                      │
//! │  Payment Mode:           UPI                                 │
//! │  Payment Date:           05-Jan-2025                         │
//! │                                                              │
//! │  Landlord Details                                            │
//! │  Name / Address / PAN Number                                 │
//! │                                                   [ PAID ]   │
//! │                                      ____________________    │
//! │                                      Landlord's Signature    │
//! │                                      Date: 05-Jan-2025       │
//! │  * Revenue stamp required for rent above ₹5,000/month        │
//! └──────────────────────────────────────────────────────────────┘
//! ```

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::fmt::Write as _;

use rentslip_core::view::ReceiptView;

use crate::error::{AppError, AppResult};

// =============================================================================
// Snapshot
// =============================================================================

/// Encoding of a rendered receipt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotFormat {
    Png,
    Text,
}

impl SnapshotFormat {
    pub const fn mime(&self) -> &'static str {
        match self {
            SnapshotFormat::Png => "image/png",
            SnapshotFormat::Text => "text/plain;charset=utf-8",
        }
    }

    /// File extension used on export.
    pub const fn extension(&self) -> &'static str {
        match self {
            SnapshotFormat::Png => "png",
            SnapshotFormat::Text => "txt",
        }
    }

    fn from_mime(mime: &str) -> Option<Self> {
        match mime {
            "image/png" => Some(SnapshotFormat::Png),
            "text/plain;charset=utf-8" | "text/plain" => Some(SnapshotFormat::Text),
            _ => None,
        }
    }
}

/// A rendered receipt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub bytes: Vec<u8>,
    pub format: SnapshotFormat,
}

impl Snapshot {
    /// `data:<mime>;base64,<payload>`, the form kept in `imageDataUrl`.
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.format.mime(), STANDARD.encode(&self.bytes))
    }

    /// Decodes a stored `imageDataUrl`.
    pub fn from_data_url(url: &str) -> AppResult<Self> {
        let invalid = |reason: &str| AppError::RenderFailed(format!("Invalid data URL: {}", reason));

        let rest = url.strip_prefix("data:").ok_or_else(|| invalid("missing data: prefix"))?;
        let (mime, payload) = rest
            .split_once(";base64,")
            .ok_or_else(|| invalid("not base64 encoded"))?;
        let format = SnapshotFormat::from_mime(mime).ok_or_else(|| invalid(mime))?;
        let bytes = STANDARD
            .decode(payload)
            .map_err(|e| invalid(&e.to_string()))?;

        Ok(Snapshot { bytes, format })
    }
}

// =============================================================================
// Renderer
// =============================================================================

/// Draws a receipt.
pub trait ReceiptRenderer: Send + Sync {
    fn render(&self, view: &ReceiptView) -> AppResult<Snapshot>;
}

/// Fixed-width text rendering of the receipt card.
#[derive(Debug, Clone)]
pub struct TextReceiptRenderer {
    width: usize,
}

const LABEL_WIDTH: usize = 24;
const DEFAULT_WIDTH: usize = 64;
const MIN_WIDTH: usize = 48;

impl Default for TextReceiptRenderer {
    fn default() -> Self {
        TextReceiptRenderer {
            width: DEFAULT_WIDTH,
        }
    }
}

impl TextReceiptRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Card width in characters (clamped to a readable minimum).
    pub fn with_width(width: usize) -> Self {
        TextReceiptRenderer {
            width: width.max(MIN_WIDTH),
        }
    }

    fn draw(&self, view: &ReceiptView) -> Result<String, std::fmt::Error> {
        let inner = self.width - 4;
        let mut out = String::new();
        let rule = "─".repeat(self.width - 2);

        writeln!(out, "┌{}┐", rule)?;
        line(&mut out, inner, &center("RENT RECEIPT", inner))?;
        line(&mut out, inner, &right(&format!("Receipt No: {}", view.receipt_number), inner))?;
        line(&mut out, inner, "")?;

        let value_width = inner - LABEL_WIDTH;
        let fields = [
            ("Received From:", view.received_from.as_str()),
            ("Amount:", view.amount.as_str()),
            ("Amount in Words:", view.amount_in_words.as_str()),
            ("For Rent of Property:", view.property_address.as_str()),
            ("Rental Period:", view.rental_period.as_str()),
            ("Payment Mode:", view.payment_mode.as_str()),
            ("Payment Date:", view.payment_date.as_str()),
        ];
        for (label, value) in fields {
            field(&mut out, inner, value_width, label, value)?;
        }

        line(&mut out, inner, "")?;
        line(&mut out, inner, "Landlord Details")?;
        field(&mut out, inner, value_width, "Name:", &view.landlord_name)?;
        field(&mut out, inner, value_width, "Address:", &view.landlord_address)?;
        field(&mut out, inner, value_width, "PAN Number:", &view.landlord_pan)?;
        line(&mut out, inner, "")?;

        line(&mut out, inner, &right("[ PAID ]", inner))?;
        line(&mut out, inner, "")?;
        line(&mut out, inner, &right("____________________", inner))?;
        line(&mut out, inner, &right("Landlord's Signature", inner))?;
        line(&mut out, inner, &right(&format!("Date: {}", view.issued_on), inner))?;

        if view.revenue_stamp_required {
            line(&mut out, inner, "")?;
            for chunk in wrap("* Revenue stamp required for rent above ₹5,000/month", inner) {
                line(&mut out, inner, &chunk)?;
            }
        }

        writeln!(out, "└{}┘", rule)?;
        Ok(out)
    }
}

impl ReceiptRenderer for TextReceiptRenderer {
    fn render(&self, view: &ReceiptView) -> AppResult<Snapshot> {
        let text = self
            .draw(view)
            .map_err(|e| AppError::RenderFailed(e.to_string()))?;

        Ok(Snapshot {
            bytes: text.into_bytes(),
            format: SnapshotFormat::Text,
        })
    }
}

// =============================================================================
// Layout helpers (widths are in chars, not bytes: "₹" is 3 bytes)
// =============================================================================

fn width_of(s: &str) -> usize {
    s.chars().count()
}

fn line(out: &mut String, inner: usize, content: &str) -> std::fmt::Result {
    let pad = inner.saturating_sub(width_of(content));
    writeln!(out, "│ {}{} │", content, " ".repeat(pad))
}

fn field(
    out: &mut String,
    inner: usize,
    value_width: usize,
    label: &str,
    value: &str,
) -> std::fmt::Result {
    let label_pad = " ".repeat(LABEL_WIDTH.saturating_sub(width_of(label)));
    let indent = " ".repeat(LABEL_WIDTH);

    for (i, chunk) in wrap(value, value_width).into_iter().enumerate() {
        if i == 0 {
            line(out, inner, &format!("{}{}{}", label, label_pad, chunk))?;
        } else {
            line(out, inner, &format!("{}{}", indent, chunk))?;
        }
    }
    Ok(())
}

fn center(text: &str, inner: usize) -> String {
    let left = inner.saturating_sub(width_of(text)) / 2;
    format!("{}{}", " ".repeat(left), text)
}

fn right(text: &str, inner: usize) -> String {
    format!("{}{}", " ".repeat(inner.saturating_sub(width_of(text))), text)
}

/// Greedy word wrap. Words longer than `width` are split.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let mut word: String = word.to_string();

        while width_of(&word) > width {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let head: String = word.chars().take(width).collect();
            word = word.chars().skip(width).collect();
            lines.push(head);
        }

        if current.is_empty() {
            current = word;
        } else if width_of(&current) + 1 + width_of(&word) <= width {
            current.push(' ');
            current.push_str(&word);
        } else {
            lines.push(std::mem::replace(&mut current, word));
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rentslip_core::types::{FormData, PaymentMode};

    fn view(rent: f64) -> ReceiptView {
        let form = FormData {
            tenant_name: "Asha Verma".to_string(),
            landlord_name: "R. K. Iyer".to_string(),
            landlord_address: "4 Park Street, Kolkata".to_string(),
            landlord_pan: "ABCDE1234F".to_string(),
            rent_amount: Some(rent),
            rental_period_start: "2025-01-01".to_string(),
            rental_period_end: "2025-01-31".to_string(),
            payment_date: "2025-01-05".to_string(),
            property_address: "12 MG Road, Bengaluru".to_string(),
            payment_mode: PaymentMode::Upi,
        };
        let issued = NaiveDate::from_ymd_opt(2025, 1, 5).unwrap();
        ReceiptView::from_form(&form, "RR-2025-001", issued)
    }

    fn render_text(view: &ReceiptView) -> String {
        let snapshot = TextReceiptRenderer::new().render(view).unwrap();
        assert_eq!(snapshot.format, SnapshotFormat::Text);
        String::from_utf8(snapshot.bytes).unwrap()
    }

    #[test]
    fn test_renders_receipt_fields() {
        let text = render_text(&view(15000.0));

        assert!(text.contains("RENT RECEIPT"));
        assert!(text.contains("Receipt No: RR-2025-001"));
        assert!(text.contains("Asha Verma"));
        assert!(text.contains("₹15,000"));
        assert!(text.contains("Rupees Fifteen Thousand Only"));
        assert!(text.contains("01-31 Jan 2025"));
        assert!(text.contains("UPI"));
        assert!(text.contains("ABCDE1234F"));
        assert!(text.contains("Date: 05-Jan-2025"));
        assert!(text.contains("[ PAID ]"));
        assert!(text.contains("Revenue stamp required"));
    }

    #[test]
    fn test_no_revenue_stamp_notice_for_small_rent() {
        let text = render_text(&view(5000.0));
        assert!(!text.contains("Revenue stamp"));
    }

    #[test]
    fn test_every_line_has_the_same_width() {
        let text = render_text(&view(123456.78));
        let widths: Vec<usize> = text.lines().map(|l| l.chars().count()).collect();
        assert!(widths.iter().all(|w| *w == DEFAULT_WIDTH), "{:?}", widths);
    }

    #[test]
    fn test_wrap() {
        assert_eq!(wrap("one two three", 7), vec!["one two", "three"]);
        assert_eq!(wrap("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
        assert_eq!(wrap("", 10), vec![""]);
    }

    #[test]
    fn test_data_url_round_trip() {
        let snapshot = Snapshot {
            bytes: b"receipt".to_vec(),
            format: SnapshotFormat::Text,
        };
        let url = snapshot.to_data_url();
        assert!(url.starts_with("data:text/plain;charset=utf-8;base64,"));
        assert_eq!(Snapshot::from_data_url(&url).unwrap(), snapshot);
    }

    #[test]
    fn test_rejects_foreign_data_urls() {
        assert!(Snapshot::from_data_url("https://example.com/r.png").is_err());
        assert!(Snapshot::from_data_url("data:image/gif;base64,AAAA").is_err());
        assert!(Snapshot::from_data_url("data:image/png;base64,***").is_err());
    }
}
