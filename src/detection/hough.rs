use image::GrayImage;
use imageproc::edges::canny;
use imageproc::gradients::{horizontal_sobel, vertical_sobel};

use super::Circle;

/// Fixed parameters for the gradient Hough transform.
#[derive(Debug, Clone)]
pub struct HoughParams {
    /// Minimum distance between accepted circle centers, in pixels.
    pub min_center_distance: f32,
    /// Upper threshold for the internal Canny edge detector; the lower
    /// threshold is half of this.
    pub edge_threshold: f32,
    /// Minimum vote support for a candidate center, and for the radius
    /// estimate of an accepted center.
    pub accumulator_threshold: u32,
    pub min_radius: u32,
    pub max_radius: u32,
}

impl Default for HoughParams {
    fn default() -> Self {
        Self {
            min_center_distance: 20.0,
            edge_threshold: 80.0,
            accumulator_threshold: 50,
            min_radius: 1,
            max_radius: 100,
        }
    }
}

/// Gradient Hough circle detection on a blurred grayscale frame.
///
/// Every Canny edge pixel votes along its Sobel gradient line, in both
/// directions, once per candidate radius. Raw vote peaks become candidate
/// centers; each surviving center gets its radius from a histogram of
/// edge-point distances. A candidate whose circle overlaps an already
/// accepted, stronger circle is discarded: a real circle's vote trails
/// and distance-histogram folds can otherwise clear both thresholds at
/// offsets just beyond the minimum center distance.
pub fn detect_circles(gray: &GrayImage, params: &HoughParams) -> Vec<Circle> {
    let (width, height) = gray.dimensions();
    if width == 0 || height == 0 {
        return Vec::new();
    }

    let edges = canny(gray, params.edge_threshold / 2.0, params.edge_threshold);
    let gx = horizontal_sobel(gray);
    let gy = vertical_sobel(gray);

    let mut accumulator = vec![0u32; (width as usize) * (height as usize)];
    let mut edge_points = Vec::new();

    for (x, y, px) in edges.enumerate_pixels() {
        if px[0] == 0 {
            continue;
        }
        let dx = gx.get_pixel(x, y)[0] as f32;
        let dy = gy.get_pixel(x, y)[0] as f32;
        let magnitude = (dx * dx + dy * dy).sqrt();
        if magnitude < 1.0 {
            continue;
        }
        edge_points.push((x, y));

        let (ux, uy) = (dx / magnitude, dy / magnitude);
        for direction in [1.0f32, -1.0] {
            for radius in params.min_radius..=params.max_radius {
                let cx = (x as f32 + direction * ux * radius as f32).round();
                let cy = (y as f32 + direction * uy * radius as f32).round();
                if cx < 0.0 || cy < 0.0 || cx >= width as f32 || cy >= height as f32 {
                    continue;
                }
                accumulator[cy as usize * width as usize + cx as usize] += 1;
            }
        }
    }

    let mut circles: Vec<Circle> = Vec::new();
    for (cx, cy) in find_centers(&accumulator, width, height, params) {
        let Some(radius) = estimate_radius(&edge_points, cx, cy, params) else {
            continue;
        };
        let candidate = Circle { cx, cy, radius };
        if circles.iter().all(|kept| !overlaps(kept, &candidate)) {
            circles.push(candidate);
        }
    }
    circles
}

/// Circles overlap when their center distance is below the sum of their
/// radii.
fn overlaps(a: &Circle, b: &Circle) -> bool {
    let dx = a.cx as f32 - b.cx as f32;
    let dy = a.cy as f32 - b.cy as f32;
    (dx * dx + dy * dy).sqrt() < (a.radius + b.radius) as f32
}

/// Candidate centers: local maxima of the accumulator at or above the
/// vote threshold, strongest first, thinned so no two survive within the
/// minimum center distance. The threshold applies to raw cell votes;
/// summing a neighborhood here would lift the faint trails every edge
/// point drags across the accumulator over the threshold.
fn find_centers(accumulator: &[u32], width: u32, height: u32, params: &HoughParams) -> Vec<(u32, u32)> {
    let votes_at = |x: i64, y: i64| -> u32 {
        if x < 0 || y < 0 || x >= width as i64 || y >= height as i64 {
            0
        } else {
            accumulator[y as usize * width as usize + x as usize]
        }
    };

    let mut candidates = Vec::new();
    for y in 0..height as i64 {
        for x in 0..width as i64 {
            let score = votes_at(x, y);
            if score < params.accumulator_threshold {
                continue;
            }
            let is_peak = (-1..=1)
                .all(|oy| (-1..=1).all(|ox| votes_at(x + ox, y + oy) <= score));
            if is_peak {
                candidates.push((score, x as u32, y as u32));
            }
        }
    }

    // Strongest peaks win ties on position so the ordering is deterministic.
    candidates.sort_by(|a, b| b.0.cmp(&a.0).then(a.2.cmp(&b.2)).then(a.1.cmp(&b.1)));

    let min_distance_sq = params.min_center_distance * params.min_center_distance;
    let mut kept: Vec<(u32, u32)> = Vec::new();
    for &(_, x, y) in &candidates {
        let separated = kept.iter().all(|&(kx, ky)| {
            let dx = x as f32 - kx as f32;
            let dy = y as f32 - ky as f32;
            dx * dx + dy * dy >= min_distance_sq
        });
        if separated {
            kept.push((x, y));
        }
    }
    kept
}

/// Histogram of edge-point distances from the center, smoothed over
/// adjacent bins. Returns the best-supported radius, or None when even the
/// best bin falls short of the vote threshold.
fn estimate_radius(
    edge_points: &[(u32, u32)],
    cx: u32,
    cy: u32,
    params: &HoughParams,
) -> Option<u32> {
    let max_radius = params.max_radius as usize;
    let mut histogram = vec![0u32; max_radius + 2];
    for &(x, y) in edge_points {
        let dx = x as f32 - cx as f32;
        let dy = y as f32 - cy as f32;
        let distance = (dx * dx + dy * dy).sqrt().round() as usize;
        if distance >= params.min_radius as usize && distance <= max_radius {
            histogram[distance] += 1;
        }
    }

    let mut best: Option<(u32, usize)> = None;
    for radius in params.min_radius.max(1) as usize..=max_radius {
        let support = histogram[radius - 1] + histogram[radius] + histogram[radius + 1];
        if best.is_none_or(|(s, _)| support > s) {
            best = Some((support, radius));
        }
    }

    best.filter(|&(support, _)| support >= params.accumulator_threshold)
        .map(|(_, radius)| radius as u32)
}
