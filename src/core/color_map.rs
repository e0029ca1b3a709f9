use image::Rgb;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::core::interpolation::{KeyframeInterpolator, LinearInterpolator};
use crate::core::lookup_table::LookupTable;

/**
 * Represents a single "keyframe" of the color map, pairing a
 * "query" with the color that should be produced at that query point.
 */
#[derive(Serialize, Deserialize, Debug, Clone, Copy)]
pub struct ColorMapKeyFrame {
    pub query: f32,       // specify location of this color within the map; on [0,1]
    pub rgb_raw: [u8; 3], // [R, G, B]
}

pub trait ColorMapper {
    fn compute_pixel(&self, query: f32) -> image::Rgb<u8>;
}

/**
 * Piecewise-linear color map over normalized queries on [0,1]. Interpolation
 * runs in raw RGB space, which is not "strictly correct" from a color
 * standpoint, but works well enough in practice for these images.
 */
pub struct ColorMap {
    interpolator: KeyframeInterpolator<f32, Vector3<f32>, LinearInterpolator>,
}

impl ColorMap {
    pub fn new(keyframes: &[ColorMapKeyFrame]) -> ColorMap {
        assert!(!keyframes.is_empty(), "keyframes must not be empty");
        assert!(
            keyframes.first().unwrap().query == 0.0,
            "first keyframe query must be 0.0"
        );
        assert!(
            keyframes.last().unwrap().query == 1.0,
            "last keyframe query must be 1.0"
        );

        let internal_keyframes: Vec<(f32, Vector3<f32>)> = keyframes
            .iter()
            .map(|keyframe| {
                (
                    keyframe.query,
                    Vector3::new(
                        keyframe.rgb_raw[0] as f32,
                        keyframe.rgb_raw[1] as f32,
                        keyframe.rgb_raw[2] as f32,
                    ),
                )
            })
            .collect();

        ColorMap {
            interpolator: KeyframeInterpolator::new(internal_keyframes, LinearInterpolator {}),
        }
    }
}

impl ColorMapper for ColorMap {
    fn compute_pixel(&self, query: f32) -> image::Rgb<u8> {
        let color: Vector3<f32> = self.interpolator.evaluate(query);
        Rgb([
            color[0].clamp(0.0, 255.0) as u8,
            color[1].clamp(0.0, 255.0) as u8,
            color[2].clamp(0.0, 255.0) as u8,
        ])
    }
}

/**
 * Wrapper around a color map that precomputes a look-up table mapping from
 * query to the resulting color. This makes evaluation much faster.
 */
pub struct ColorMapLookUpTable {
    pub table: LookupTable<image::Rgb<u8>>,
}

impl ColorMapLookUpTable {
    pub fn from_color_map<F: ColorMapper>(
        color_map: &F,
        entry_count: usize,
    ) -> ColorMapLookUpTable {
        ColorMapLookUpTable {
            table: LookupTable::new([0.0, 1.0], entry_count, |query: f32| {
                color_map.compute_pixel(query)
            }),
        }
    }
}

impl ColorMapper for ColorMapLookUpTable {
    fn compute_pixel(&self, query: f32) -> image::Rgb<u8> {
        *self.table.lookup(query)
    }
}
