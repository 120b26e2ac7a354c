//! Store rows to display table

use serde::Serialize;

use crate::core::{Result, SearchError};
use crate::render::escape_html;
use crate::storage::StoreRow;

pub const DISPLAY_HEADERS: [&str; 4] = ["Cheese Name", "Aroma", "Country", "Image"];

/// Typed search hit. Built from a `StoreRow` as soon as it leaves the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResultRow {
    pub name: String,
    pub aroma: String,
    pub country_origin: String,
    pub image: String,
}

impl SearchResultRow {
    pub fn from_store_row(index: usize, row: &StoreRow) -> Result<Self> {
        let field = |name: &'static str| {
            row.get(name)
                .map(str::to_string)
                .ok_or(SearchError::MalformedRow { index, field: name })
        };

        Ok(Self {
            name: field("name")?,
            aroma: field("aroma")?,
            country_origin: field("country_origin")?,
            image: field("image")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayRow {
    #[serde(flatten)]
    pub row: SearchResultRow,
    pub image_html: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DisplayTable {
    rows: Vec<DisplayRow>,
}

impl DisplayTable {
    pub fn rows(&self) -> &[DisplayRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn to_html(&self) -> String {
        let mut html = String::from("<table class=\"results\">\n<thead><tr>");
        for header in DISPLAY_HEADERS {
            html.push_str(&format!("<th>{}</th>", header));
        }
        html.push_str("</tr></thead>\n<tbody>\n");

        for display in &self.rows {
            html.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                escape_html(&display.row.name),
                escape_html(&display.row.aroma),
                escape_html(&display.row.country_origin),
                display.image_html,
            ));
        }

        html.push_str("</tbody>\n</table>");
        html
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ResultFormatter {
    image_max_height_px: u32,
}

impl ResultFormatter {
    pub fn new(image_max_height_px: u32) -> Self {
        Self { image_max_height_px }
    }

    pub fn image_markup(&self, src: &str) -> String {
        format!(
            "<img src=\"{}\" style=\"max-height:{}px;\"/>",
            escape_html(src),
            self.image_max_height_px
        )
    }

    /// Every row is typed before any markup is produced, so one malformed
    /// row fails the whole table.
    pub fn format(&self, rows: &[StoreRow]) -> Result<DisplayTable> {
        let typed = rows
            .iter()
            .enumerate()
            .map(|(index, row)| SearchResultRow::from_store_row(index, row))
            .collect::<Result<Vec<_>>>()?;

        let rows = typed
            .into_iter()
            .map(|row| DisplayRow {
                image_html: self.image_markup(&row.image),
                row,
            })
            .collect();

        Ok(DisplayTable { rows })
    }
}

impl Default for ResultFormatter {
    fn default() -> Self {
        Self::new(124)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str) -> StoreRow {
        StoreRow::new()
            .with("name", name)
            .with("aroma", "earthy")
            .with("country_origin", "France")
            .with("image", format!("https://img.example/{}.jpg", name.to_lowercase()))
    }

    #[test]
    fn test_preserves_order_and_wraps_images() {
        let table = ResultFormatter::default()
            .format(&[row("Brie"), row("Camembert")])
            .unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[0].row.name, "Brie");
        assert_eq!(table.rows()[1].row.name, "Camembert");
        assert_eq!(
            table.rows()[0].image_html,
            "<img src=\"https://img.example/brie.jpg\" style=\"max-height:124px;\"/>"
        );
    }

    #[test]
    fn test_missing_image_fails_whole_table() {
        let broken = StoreRow::new()
            .with("name", "Feta")
            .with("aroma", "salty")
            .with("country_origin", "Greece");

        let err = ResultFormatter::default()
            .format(&[row("Brie"), broken])
            .unwrap_err();

        match err {
            SearchError::MalformedRow { index, field } => {
                assert_eq!(index, 1);
                assert_eq!(field, "image");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_null_field_is_malformed() {
        let mut nulled = row("Brie");
        nulled.insert("aroma", None);
        assert!(matches!(
            ResultFormatter::default().format(&[nulled]),
            Err(SearchError::MalformedRow { field: "aroma", .. })
        ));
    }

    #[test]
    fn test_html_column_order_and_escaping() {
        let table = ResultFormatter::new(80)
            .format(&[row("Brie").with("name", "<b>Brie</b>").with("image", "a\"b.jpg")])
            .unwrap();
        let html = table.to_html();

        let header_positions: Vec<usize> = DISPLAY_HEADERS
            .iter()
            .map(|h| html.find(&format!("<th>{}</th>", h)).unwrap())
            .collect();
        assert!(header_positions.windows(2).all(|w| w[0] < w[1]));

        assert!(html.contains("<td>&lt;b&gt;Brie&lt;/b&gt;</td>"));
        assert!(html.contains("src=\"a&quot;b.jpg\" style=\"max-height:80px;\""));
    }

    #[test]
    fn test_empty_rows_give_empty_table() {
        let table = ResultFormatter::default().format(&[]).unwrap();
        assert!(table.is_empty());
        assert!(table.to_html().contains("<tbody>\n</tbody>"));
    }
}
