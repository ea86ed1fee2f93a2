//! Read-only view of one record, opened with Enter on a table row.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph};

use crate::core::form::Field;
use crate::core::record::{AssetRecord, ImagePayload, format_price};
use crate::tui::component::{Component, centered_rect};
use crate::tui::palette::Palette;

pub struct RecordDetail<'a> {
    record: &'a AssetRecord,
    palette: Palette,
}

impl<'a> RecordDetail<'a> {
    pub fn new(record: &'a AssetRecord, palette: Palette) -> Self {
        Self { record, palette }
    }

    fn rows(&self) -> Vec<(&'static str, String)> {
        let r = self.record;
        vec![
            (Field::Category.label(), r.category.clone()),
            (Field::Name.label(), r.name.clone()),
            ("วันที่ได้มา", r.acquisition_date.to_string()),
            (Field::ArticleCode.label(), r.article_code.clone()),
            (Field::BrandModel.label(), r.brand_model.clone()),
            (Field::RegistrationNumber.label(), r.registration_number.clone()),
            (Field::UnitPrice.label(), format_price(r.unit_price)),
            (Field::AcquisitionMethod.label(), r.acquisition_method.clone()),
            (Field::AcquisitionDocNumber.label(), r.acquisition_doc_number.clone()),
            (Field::Location.label(), r.location.clone()),
            (Field::DisbursementProof.label(), r.disbursement_proof.clone()),
            (Field::ChangeLog.label(), r.change_log.clone()),
            (Field::ChangeDocNumber.label(), r.change_doc_number.clone()),
        ]
        .into_iter()
        .map(|(label, value)| {
            if value.trim().is_empty() {
                (label, "-".to_string())
            } else {
                (label, value)
            }
        })
        .collect()
    }
}

impl Component for RecordDetail<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = centered_rect(70, 80, area);
        frame.render_widget(Clear, overlay);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.palette.border_style())
            .title(format!(" {} ", self.record.name))
            .title_alignment(Alignment::Left)
            .title_bottom(Line::from(" e แก้ไข  Esc ปิด ").centered())
            .padding(Padding::horizontal(1))
            .style(self.palette.base());

        let label_style = Style::default()
            .fg(self.palette.accent)
            .add_modifier(Modifier::BOLD);

        let mut lines: Vec<Line> = self
            .rows()
            .into_iter()
            .map(|(label, value)| {
                Line::from(vec![
                    Span::styled(format!("{label}: "), label_style),
                    Span::raw(value),
                ])
            })
            .collect();

        let kinds: Vec<&str> = self.record.images.iter().map(ImagePayload::kind).collect();
        lines.push(Line::from(vec![
            Span::styled(format!("{}: ", Field::Images.label()), label_style),
            Span::raw(if kinds.is_empty() {
                "-".to_string()
            } else {
                format!("{} ({})", kinds.len(), kinds.join(", "))
            }),
        ]));

        // Remarks are free text; wrap them to the overlay width
        lines.push(Line::styled(format!("{}:", Field::Remarks.label()), label_style));
        let wrap_width = overlay.width.saturating_sub(6).max(1) as usize;
        if self.record.remarks.trim().is_empty() {
            lines.push(Line::styled("  -", Style::default().fg(self.palette.muted)));
        } else {
            for paragraph in self.record.remarks.lines() {
                for wrapped in textwrap::wrap(paragraph, wrap_width) {
                    lines.push(Line::raw(format!("  {wrapped}")));
                }
            }
        }

        frame.render_widget(Paragraph::new(lines).block(block), overlay);
    }
}
