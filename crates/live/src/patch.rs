//! Style patches and the rendering-surface seam.

use charge_map_markers::FeatureIdentifier;

/// A single addressed color update for one rendered feature.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StylePatch {
    pub feature_id: FeatureIdentifier,
    pub color: &'static str,
}

/// Contract required of the rendering surface.
///
/// The surface registers feature collections once, then accepts per-feature
/// dynamic style overrides addressed by stable identifier. Applying a patch
/// must never touch the feature's geometry; a feature with no override yet
/// renders in [`crate::palette::FALLBACK_COLOR`].
pub trait StyleSink {
    fn set_feature_state(&mut self, patch: StylePatch);
}

/// Buffers patches in emission order.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub patches: Vec<StylePatch>,
}

impl StyleSink for RecordingSink {
    fn set_feature_state(&mut self, patch: StylePatch) {
        self.patches.push(patch);
    }
}
