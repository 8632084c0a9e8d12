//! Vertical layout: a parsed verse becomes columns read top-to-bottom,
//! right-to-left.

use serde::Serialize;

use crate::parse::{ParsedHaiku, Token};

/// Gloss size relative to its base.
pub const RUBY_SCALE: f32 = 0.7;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LayoutStyle {
    /// Verse body size.
    pub font_size: f32,
    pub preface_font_size: f32,
    /// Column height, in the renderer's units.
    pub height: u32,
}

impl Default for LayoutStyle {
    fn default() -> Self {
        Self {
            font_size: 18.0,
            preface_font_size: 14.0,
            height: 500,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnRole {
    Preface,
    Body,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Run {
    Plain {
        text: String,
        size: f32,
    },
    Annotated {
        base: String,
        base_size: f32,
        gloss: String,
        gloss_size: f32,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    pub role: ColumnRole,
    pub font_size: f32,
    pub runs: Vec<Run>,
}

/// Columns in reading order: `columns[0]` is the rightmost.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VerticalLayout {
    pub height: u32,
    pub columns: Vec<Column>,
}

impl VerticalLayout {
    pub fn column(&self, role: ColumnRole) -> Option<&Column> {
        self.columns.iter().find(|c| c.role == role)
    }
}

/// Lay out a parsed verse: preface (if any) on the right at the smaller
/// size, body to its left.
///
/// A preface with no tokens gets no column.
pub fn compose(parsed: &ParsedHaiku, style: &LayoutStyle) -> VerticalLayout {
    let mut columns = Vec::with_capacity(2);
    if let Some(preface) = parsed.preface.as_deref()
        && !preface.is_empty()
    {
        columns.push(column(ColumnRole::Preface, preface, style.preface_font_size));
    }
    columns.push(column(ColumnRole::Body, &parsed.body, style.font_size));
    VerticalLayout {
        height: style.height,
        columns,
    }
}

fn column(role: ColumnRole, tokens: &[Token], font_size: f32) -> Column {
    let runs = tokens
        .iter()
        .map(|tok| match tok {
            Token::Text { content } => Run::Plain {
                text: content.clone(),
                size: font_size,
            },
            Token::Ruby { base, gloss } => Run::Annotated {
                base: base.clone(),
                base_size: font_size,
                gloss: gloss.clone(),
                gloss_size: font_size * RUBY_SCALE,
            },
        })
        .collect();
    Column {
        role,
        font_size,
        runs,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse;

    #[test]
    fn preface_is_rightmost() {
        let layout = compose(
            &parse("（（寒し））｜遠山（とおやま）に日は入る"),
            &LayoutStyle::default(),
        );
        let roles: Vec<ColumnRole> = layout.columns.iter().map(|c| c.role).collect();
        assert_eq!(roles, [ColumnRole::Preface, ColumnRole::Body]);
        assert_eq!(layout.columns[0].font_size, 14.0);
        assert_eq!(layout.columns[1].font_size, 18.0);
        assert_eq!(layout.height, 500);
    }

    #[test]
    fn body_only_without_preface() {
        let layout = compose(&parse("古池や"), &LayoutStyle::default());
        assert_eq!(layout.columns.len(), 1);
        assert!(layout.column(ColumnRole::Preface).is_none());
        assert_eq!(
            layout.columns[0].runs,
            vec![Run::Plain {
                text: "古池や".into(),
                size: 18.0
            }]
        );
    }

    #[test]
    fn empty_preface_has_no_column() {
        let layout = compose(&parse("（（））本文"), &LayoutStyle::default());
        assert_eq!(layout.columns.len(), 1);
        assert_eq!(layout.columns[0].role, ColumnRole::Body);
    }

    #[test]
    fn gloss_scaled_from_column_size() {
        let style = LayoutStyle {
            font_size: 20.0,
            preface_font_size: 10.0,
            height: 300,
        };
        let layout = compose(&parse("（（｜序（じょ） ））｜雨（あめ）"), &style);
        let Run::Annotated { gloss_size, .. } = &layout.columns[0].runs[0] else {
            panic!("expected annotated run");
        };
        assert!((gloss_size - 7.0).abs() < 1e-4);
        let Run::Annotated {
            base, gloss_size, ..
        } = &layout.columns[1].runs[0]
        else {
            panic!("expected annotated run");
        };
        assert_eq!(base, "雨");
        assert!((gloss_size - 14.0).abs() < 1e-4);
    }
}
