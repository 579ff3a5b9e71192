use std::fmt;

use crate::core::emotions::Emotion;
use crate::models::EmotionResult;

/// Width of the text confidence bar at 100%
const TEXT_BAR_WIDTH: usize = 30;

/// Headline card for the top-ranked emotion
#[derive(Debug, Clone, PartialEq)]
pub struct PrimaryCard {
    pub emotion: Emotion,
    pub title: &'static str,
    pub emoji: &'static str,
    pub confidence_label: String,
    pub bar_width_percent: f64,
    pub description: String,
}

/// One row of the "other detected emotions" list
#[derive(Debug, Clone, PartialEq)]
pub struct SecondaryRow {
    pub emotion: Emotion,
    pub title: &'static str,
    pub emoji: &'static str,
    pub percent_label: String,
    pub bar_width_percent: f64,
}

/// Presentation model of a ranked result list
#[derive(Debug, Clone, PartialEq)]
pub struct ResultsView {
    pub primary: PrimaryCard,
    pub secondary: Vec<SecondaryRow>,
}

impl ResultsView {
    /// Build the view from an already ranked list; `None` when there is nothing to show
    pub fn build(results: &[EmotionResult]) -> Option<Self> {
        let (first, rest) = results.split_first()?;

        let primary = PrimaryCard {
            emotion: first.emotion,
            title: first.emotion.display_name(),
            emoji: first.emotion.emoji(),
            confidence_label: format!("{:.1}% confident", first.percent()),
            bar_width_percent: bar_width(first.confidence),
            description: first.description.clone(),
        };

        let secondary = rest
            .iter()
            .map(|r| SecondaryRow {
                emotion: r.emotion,
                title: r.emotion.display_name(),
                emoji: r.emotion.emoji(),
                percent_label: format!("{:.0}%", r.percent()),
                bar_width_percent: bar_width(r.confidence),
            })
            .collect();

        Some(Self { primary, secondary })
    }
}

#[inline]
fn bar_width(confidence: f64) -> f64 {
    (confidence * 100.0).clamp(0.0, 100.0)
}

fn text_bar(width_percent: f64) -> String {
    let filled = ((width_percent / 100.0) * TEXT_BAR_WIDTH as f64).round() as usize;
    let filled = filled.min(TEXT_BAR_WIDTH);
    format!("{}{}", "█".repeat(filled), "░".repeat(TEXT_BAR_WIDTH - filled))
}

impl fmt::Display for ResultsView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = &self.primary;
        writeln!(f, "{} {}  [Primary]  {}", p.emoji, p.title, p.confidence_label)?;
        writeln!(f, "{}", text_bar(p.bar_width_percent))?;
        writeln!(f, "{}", p.description)?;

        if !self.secondary.is_empty() {
            writeln!(f)?;
            writeln!(f, "Other Detected Emotions")?;
            for row in &self.secondary {
                writeln!(
                    f,
                    "{} {:<10} {} {:>4}",
                    row.emoji,
                    row.title,
                    text_bar(row.bar_width_percent),
                    row.percent_label
                )?;
            }
        }
        Ok(())
    }
}
