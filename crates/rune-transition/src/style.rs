//! Style fragments and per-tick style maps.
//!
//! A [`Style`] is a fixed-key record; unset fields mean "leave the element's own
//! style alone". [`StyleMap`] values are built once per tick through
//! [`StyleMapBuilder`] and never mutated afterwards.

use std::collections::BTreeMap;
use std::collections::btree_map;

use serde::{Deserialize, Serialize};

use crate::interpolate::Angle;

/// Every style property a transition definition may drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StyleProperty {
    Opacity,
    Left,
    Top,
    Width,
    Height,
    Rotate,
    TranslateX,
    TranslateY,
}

impl StyleProperty {
    /// Whether the platform's native animation driver can animate this property.
    ///
    /// Opacity and 2-D transforms run natively; screen-relative geometry does not.
    pub fn supports_native_driver(&self) -> bool {
        match self {
            Self::Opacity | Self::Rotate | Self::TranslateX | Self::TranslateY => true,
            Self::Left | Self::Top | Self::Width | Self::Height => false,
        }
    }
}

/// One entry in a transform list.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TransformOp {
    Rotate(Angle),
    TranslateX(f64),
    TranslateY(f64),
}

impl TransformOp {
    pub fn property(&self) -> StyleProperty {
        match self {
            Self::Rotate(_) => StyleProperty::Rotate,
            Self::TranslateX(_) => StyleProperty::TranslateX,
            Self::TranslateY(_) => StyleProperty::TranslateY,
        }
    }
}

/// A style fragment for one item at one tick.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Style {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    /// The transform list is a single style key: a later fragment that sets a
    /// transform replaces the whole list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transform: Option<Vec<TransformOp>>,
}

impl Style {
    pub fn builder() -> StyleBuilder {
        StyleBuilder::default()
    }

    pub fn is_empty(&self) -> bool {
        self.opacity.is_none()
            && self.left.is_none()
            && self.top.is_none()
            && self.width.is_none()
            && self.height.is_none()
            && self.transform.is_none()
    }

    /// Overlay `later` on top of `self`: keys set in `later` win, keys only set in
    /// `self` are kept.
    pub fn merged(self, later: Style) -> Style {
        Style {
            opacity: later.opacity.or(self.opacity),
            left: later.left.or(self.left),
            top: later.top.or(self.top),
            width: later.width.or(self.width),
            height: later.height.or(self.height),
            transform: later.transform.or(self.transform),
        }
    }

    /// Properties this fragment sets.
    pub fn properties(&self) -> Vec<StyleProperty> {
        let mut props = Vec::new();
        let scalar = [
            (self.opacity, StyleProperty::Opacity),
            (self.left, StyleProperty::Left),
            (self.top, StyleProperty::Top),
            (self.width, StyleProperty::Width),
            (self.height, StyleProperty::Height),
        ];
        props.extend(scalar.iter().filter(|(v, _)| v.is_some()).map(|(_, p)| *p));
        if let Some(ops) = &self.transform {
            props.extend(ops.iter().map(TransformOp::property));
        }
        props
    }
}

/// Builder for [`Style`].
#[derive(Debug, Clone, Default)]
pub struct StyleBuilder {
    style: Style,
}

impl StyleBuilder {
    pub fn opacity(mut self, value: f64) -> Self {
        self.style.opacity = Some(value);
        self
    }

    /// Absolute frame: left, top, width, height.
    pub fn frame(mut self, left: f64, top: f64, width: f64, height: f64) -> Self {
        self.style.left = Some(left);
        self.style.top = Some(top);
        self.style.width = Some(width);
        self.style.height = Some(height);
        self
    }

    pub fn transform(mut self, op: TransformOp) -> Self {
        self.style.transform.get_or_insert_with(Vec::new).push(op);
        self
    }

    pub fn build(self) -> Style {
        self.style
    }
}

/// Immutable `item id → style` mapping for one side of a transition.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyleMap {
    entries: BTreeMap<String, Style>,
}

impl StyleMap {
    pub fn builder() -> StyleMapBuilder {
        StyleMapBuilder::default()
    }

    pub fn get(&self, id: &str) -> Option<&Style> {
        self.entries.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, Style> {
        self.entries.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Merge `later` into this map; see [`Style::merged`] for per-item rules.
    pub fn merged(self, later: StyleMap) -> StyleMap {
        let mut builder = StyleMapBuilder { entries: self.entries };
        for (id, style) in later.entries {
            builder = builder.merge(id, style);
        }
        builder.build()
    }
}

impl<'a> IntoIterator for &'a StyleMap {
    type Item = (&'a String, &'a Style);
    type IntoIter = btree_map::Iter<'a, String, Style>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Single-pass builder for [`StyleMap`].
#[derive(Debug, Clone, Default)]
pub struct StyleMapBuilder {
    entries: BTreeMap<String, Style>,
}

impl StyleMapBuilder {
    /// Set the style for `id`, replacing any previous entry.
    pub fn insert(mut self, id: impl Into<String>, style: Style) -> Self {
        self.entries.insert(id.into(), style);
        self
    }

    /// Overlay `style` onto any existing entry for `id`.
    pub fn merge(mut self, id: impl Into<String>, style: Style) -> Self {
        match self.entries.entry(id.into()) {
            btree_map::Entry::Occupied(mut slot) => {
                let earlier = std::mem::take(slot.get_mut());
                *slot.get_mut() = earlier.merged(style);
            }
            btree_map::Entry::Vacant(slot) => {
                slot.insert(style);
            }
        }
        self
    }

    pub fn build(self) -> StyleMap {
        StyleMap {
            entries: self.entries,
        }
    }
}

/// Styles for both sides of a transition at one tick.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StyleMaps {
    /// Styles for items rendered on (or cloned from) the outgoing route.
    #[serde(default, skip_serializing_if = "StyleMap::is_empty")]
    pub from: StyleMap,
    /// Styles for items rendered on the incoming route.
    #[serde(default, skip_serializing_if = "StyleMap::is_empty")]
    pub to: StyleMap,
}

impl StyleMaps {
    pub fn new(from: StyleMap, to: StyleMap) -> Self {
        Self { from, to }
    }

    pub fn from_only(from: StyleMap) -> Self {
        Self {
            from,
            to: StyleMap::default(),
        }
    }

    pub fn to_only(to: StyleMap) -> Self {
        Self {
            from: StyleMap::default(),
            to,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.from.is_empty() && self.to.is_empty()
    }

    /// Merge `later` on top of `self`, side by side.
    pub fn merged(self, later: StyleMaps) -> StyleMaps {
        StyleMaps {
            from: self.from.merged(later.from),
            to: self.to.merged(later.to),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_builder() {
        let style = Style::builder()
            .opacity(0.5)
            .transform(TransformOp::Rotate(Angle::deg(90.0)))
            .transform(TransformOp::TranslateX(10.0))
            .build();

        assert_eq!(style.opacity, Some(0.5));
        assert_eq!(
            style.properties(),
            vec![
                StyleProperty::Opacity,
                StyleProperty::Rotate,
                StyleProperty::TranslateX
            ]
        );
    }

    #[test]
    fn test_merge_later_wins_and_unions() {
        let earlier = Style::builder()
            .opacity(1.0)
            .transform(TransformOp::Rotate(Angle::deg(0.0)))
            .build();
        let later = Style::builder().opacity(0.25).frame(1.0, 2.0, 3.0, 4.0).build();

        let merged = earlier.merged(later);
        assert_eq!(merged.opacity, Some(0.25));
        assert_eq!(merged.left, Some(1.0));
        assert_eq!(
            merged.transform,
            Some(vec![TransformOp::Rotate(Angle::deg(0.0))])
        );
    }

    #[test]
    fn test_style_map_merge() {
        let a = StyleMap::builder()
            .insert("image-1", Style::builder().opacity(1.0).build())
            .build();
        let b = StyleMap::builder()
            .insert(
                "image-1",
                Style::builder().transform(TransformOp::TranslateY(4.0)).build(),
            )
            .insert("image-2", Style::builder().opacity(0.0).build())
            .build();

        let merged = a.merged(b);
        assert_eq!(merged.len(), 2);
        let style = merged.get("image-1").unwrap();
        assert_eq!(style.opacity, Some(1.0));
        assert_eq!(style.transform, Some(vec![TransformOp::TranslateY(4.0)]));
    }

    #[test]
    fn test_native_driver_support() {
        assert!(StyleProperty::Opacity.supports_native_driver());
        assert!(StyleProperty::TranslateX.supports_native_driver());
        assert!(!StyleProperty::Left.supports_native_driver());
        assert!(!StyleProperty::Height.supports_native_driver());
    }

    #[test]
    fn test_style_maps_serialization() {
        let maps = StyleMaps::to_only(
            StyleMap::builder()
                .insert(
                    "$scene-Detail",
                    Style::builder()
                        .opacity(0.0)
                        .transform(TransformOp::Rotate(Angle::deg(0.0)))
                        .build(),
                )
                .build(),
        );

        let json = serde_json::to_value(&maps).unwrap();
        assert!(json.get("from").is_none());
        assert_eq!(json["to"]["$scene-Detail"]["opacity"], 0.0);
        assert_eq!(json["to"]["$scene-Detail"]["transform"][0]["rotate"], "0deg");
    }
}
