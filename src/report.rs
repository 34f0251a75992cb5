// src/report.rs

use glam::IVec2;
use percent_engine::{Bounds, PercentLayout};
use serde::Serialize;

use crate::description::DescriptionAdapter;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentBounds {
    pub name: String,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

/// Everything the tool prints about a layout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutReport {
    pub preferred: [i32; 2],
    pub minimum: [i32; 2],
    pub area: [i32; 2],
    pub column_sizes: Vec<i32>,
    pub row_sizes: Vec<i32>,
    pub components: Vec<ComponentBounds>,
}

impl LayoutReport {
    /// Lays out the grid in an area of `width` x `height`. Missing
    /// dimensions are taken from the preferred size.
    pub fn compute(
        layout: &mut PercentLayout<usize>,
        adapter: &DescriptionAdapter<'_>,
        width: Option<i32>,
        height: Option<i32>,
    ) -> Self {
        let preferred = layout.preferred_size(adapter);
        let minimum = layout.minimum_size(adapter);
        let area = IVec2::new(width.unwrap_or(preferred.x), height.unwrap_or(preferred.y));

        let result = layout.layout(adapter, Bounds::from_size(area));
        let components = result
            .bounds
            .iter()
            .enumerate()
            .map(|(idx, bounds)| ComponentBounds {
                name: adapter.name(idx).to_string(),
                x: bounds.x(),
                y: bounds.y(),
                width: bounds.width(),
                height: bounds.height(),
            })
            .collect();

        Self {
            preferred: preferred.to_array(),
            minimum: minimum.to_array(),
            area: area.to_array(),
            column_sizes: result.column_sizes.clone(),
            row_sizes: result.row_sizes.clone(),
            components,
        }
    }

    pub fn to_text(&self) -> String {
        let mut lines = vec![
            format!("preferred: {}x{}", self.preferred[0], self.preferred[1]),
            format!("minimum: {}x{}", self.minimum[0], self.minimum[1]),
            format!("area: {}x{}", self.area[0], self.area[1]),
            format!("columns: {:?}", self.column_sizes),
            format!("rows: {:?}", self.row_sizes),
        ];
        lines.extend(self.components.iter().map(|c| {
            format!("{}: x={} y={} width={} height={}", c.name, c.x, c.y, c.width, c.height)
        }));
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::description::LayoutDescription;
    use percent_core::FixedSizeHandler;

    const FORM: &str = r#"{
        "columns": "4, preferred, 4, preferred/100, 4",
        "rows": "4, preferred, 4",
        "components": [
            { "name": "label", "column": 1, "row": 1, "preferred": [40, 12], "minimum": [30, 12] },
            { "name": "field", "column": 3, "row": 1, "preferred": [120, 16], "minimum": [60, 16] }
        ]
    }"#;

    fn report(width: Option<i32>, height: Option<i32>) -> LayoutReport {
        let description = LayoutDescription::from_json(FORM).unwrap();
        let mut layout = description.build().unwrap();
        let adapter = DescriptionAdapter::new(&description, FixedSizeHandler::default());
        LayoutReport::compute(&mut layout, &adapter, width, height)
    }

    #[test]
    fn test_text_report() {
        insta::assert_snapshot!(report(Some(300), Some(30)).to_text(), @r###"
        preferred: 172x24
        minimum: 102x24
        area: 300x30
        columns: [4, 40, 4, 248, 4]
        rows: [4, 16, 4]
        label: x=4 y=6 width=40 height=12
        field: x=48 y=4 width=248 height=16
        "###);
    }

    #[test]
    fn test_defaults_to_preferred_size() {
        let report = report(None, None);
        assert_eq!(report.area, [172, 24]);
        assert_eq!(report.column_sizes, vec![4, 40, 4, 120, 4]);
    }

    #[test]
    fn test_shrinks_below_preferred_width() {
        let report = report(Some(150), None);
        assert_eq!(report.column_sizes, vec![4, 30, 4, 108, 4]);
        assert_eq!(report.components[1].width, 108);
    }

    #[test]
    fn test_json_report() {
        let json = serde_json::to_value(report(None, None)).unwrap();
        assert_eq!(json["preferred"], serde_json::json!([172, 24]));
        assert_eq!(json["components"][0]["name"], "label");
        assert_eq!(json["components"][1]["x"], 48);
    }
}
