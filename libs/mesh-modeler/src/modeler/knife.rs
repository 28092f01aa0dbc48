//! Two-click knife protocol.
//!
//! The first click anchors the stroke on a face. The second click ends it
//! on the face under the cursor or, on a miss, where the ray meets the
//! anchor face's plane. The anchor is consumed by the second click whether
//! or not the cut succeeds.

use super::MeshModeler;
use crate::error::{EditError, EditResult};
use crate::ops::face::require_normal;
use crate::ops::knife::{knife_cut, preview_segments, KnifeResult, KnifeStroke};
use crate::raycast::{raycast, Ray};
use config::constants::NORMAL_EPSILON;
use glam::DVec3;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// First knife point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KnifeAnchor {
    pub face: usize,
    pub local: DVec3,
    pub world: DVec3,
}

/// Knife tool state held by the session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KnifeState {
    pub enabled: bool,
    pub anchor: Option<KnifeAnchor>,
    /// World-space preview segments from the anchor to the cursor
    pub preview: Vec<(DVec3, DVec3)>,
}

impl KnifeState {
    /// Drops the anchor and preview; the tool stays enabled.
    pub fn reset(&mut self) {
        self.anchor = None;
        self.preview.clear();
    }
}

/// Outcome of a knife click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KnifeClick {
    /// The stroke was anchored; waiting for the end point.
    Started { face: usize },
    /// The stroke was applied.
    Cut(KnifeResult),
}

impl MeshModeler {
    pub fn knife(&self) -> &KnifeState {
        &self.knife
    }

    /// Turns the knife tool on or off, dropping any pending stroke.
    pub fn set_knife_enabled(&mut self, enabled: bool) {
        self.knife.enabled = enabled;
        self.knife.reset();
    }

    /// Drops a pending stroke.
    pub fn cancel_knife(&mut self) {
        self.knife.reset();
        self.status = "Knife cancelled".to_string();
    }

    /// Advances the two-click protocol with a world-space ray.
    pub fn knife_click(&mut self, ray: &Ray) -> EditResult<KnifeClick> {
        if !self.knife.enabled {
            return self.report("Knife", Err(EditError::unsatisfiable("knife tool is not active")));
        }

        let Some(anchor) = self.knife.anchor else {
            let hit = raycast(&self.store, &self.transform, ray)
                .ok_or_else(|| EditError::unsatisfiable("knife must start on a face"));
            let hit = self.report("Knife start", hit)?;
            self.knife.anchor = Some(KnifeAnchor {
                face: hit.face,
                local: hit.local_point,
                world: hit.world_point,
            });
            debug!(face = hit.face, "Knife anchored");
            return Ok(KnifeClick::Started { face: hit.face });
        };

        self.knife.reset();
        let stroke = self.knife_stroke(anchor, ray);
        let stroke = self.report("Knife cut", stroke)?;
        let (result, table) = self.edit("Knife cut", |store| knife_cut(store, &stroke))?;

        let result = KnifeResult {
            split_faces: result.split_faces,
            new_faces: result.new_faces.into_iter().filter_map(|f| table.face(f)).collect(),
        };
        if let Some(&first) = result.new_faces.first() {
            self.selection.select_face(first);
        }
        Ok(KnifeClick::Cut(result))
    }

    /// Recomputes the preview from the anchor to the cursor ray and
    /// returns the number of segments.
    pub fn update_knife_preview(&mut self, ray: &Ray) -> usize {
        self.knife.preview.clear();
        let Some(anchor) = self.knife.anchor else {
            return 0;
        };
        let segments = self
            .knife_stroke(anchor, ray)
            .and_then(|stroke| preview_segments(&self.store, &stroke));
        if let Ok(segments) = segments {
            self.knife.preview = segments
                .into_iter()
                .map(|(a, b)| (self.transform.to_world(a), self.transform.to_world(b)))
                .collect();
        }
        self.knife.preview.len()
    }

    /// Completes a stroke from `anchor` with the end picked by `ray`.
    fn knife_stroke(&self, anchor: KnifeAnchor, ray: &Ray) -> EditResult<KnifeStroke> {
        let (end, end_face) = match raycast(&self.store, &self.transform, ray) {
            Some(hit) => (hit.local_point, Some(hit.face)),
            None => (self.anchor_plane_point(anchor, ray)?, None),
        };
        Ok(KnifeStroke {
            start: anchor.local,
            end,
            start_face: Some(anchor.face),
            end_face,
        })
    }

    /// Where a missed ray meets the anchor face's plane, in local space.
    fn anchor_plane_point(&self, anchor: KnifeAnchor, ray: &Ray) -> EditResult<DVec3> {
        let normal = require_normal(&self.store, anchor.face)?;
        let origin = self.transform.to_local(ray.origin);
        let direction = self.transform.direction_to_local(ray.direction);

        let denom = direction.dot(normal);
        if denom.abs() < NORMAL_EPSILON {
            return Err(EditError::degenerate("knife end ray is parallel to the face"));
        }
        let t = (anchor.local - origin).dot(normal) / denom;
        if t < 0.0 {
            return Err(EditError::unsatisfiable("knife end is behind the camera"));
        }
        Ok(origin + direction * t)
    }
}
