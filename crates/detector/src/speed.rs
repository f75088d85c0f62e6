//! Foot-center speed derivation.
//!
//! The foot center is the mean of the heel, toe and ankle markers; its
//! per-frame velocity comes from the position gradient, reduced to a
//! scalar by the norm over the two non-vertical axes (y, z in the lab
//! coordinate convention) and median-filtered against tracking spikes.

use nalgebra::{Vector2, Vector3};

use contracts::{FootTrajectories, Trajectory};

use crate::signal::{gradient, median_filter};

/// Per-frame velocity vectors of one marker (central differences over
/// the frame axis, frame units).
pub fn marker_velocity(trajectory: &Trajectory) -> Vec<Vector3<f64>> {
    let xs: Vec<f64> = trajectory.points.iter().map(|p| p.x).collect();
    let ys: Vec<f64> = trajectory.points.iter().map(|p| p.y).collect();
    let zs: Vec<f64> = trajectory.points.iter().map(|p| p.z).collect();

    let gx = gradient(&xs);
    let gy = gradient(&ys);
    let gz = gradient(&zs);

    (0..trajectory.len())
        .map(|i| Vector3::new(gx[i], gy[i], gz[i]))
        .collect()
}

/// Mean velocity of the three foot markers per frame.
pub fn centroid_velocity(foot: &FootTrajectories) -> Vec<Vector3<f64>> {
    let heel = marker_velocity(&foot.heel);
    let toe = marker_velocity(&foot.toe);
    let ankle = marker_velocity(&foot.ankle);

    heel.iter()
        .zip(&toe)
        .zip(&ankle)
        .map(|((h, t), a)| (h + t + a) / 3.0)
        .collect()
}

/// Scalar foot-center speed: planar norm of the centroid velocity,
/// smoothed with a median filter of the given (odd) kernel length.
pub fn foot_center_speed(foot: &FootTrajectories, median_len: usize) -> Vec<f64> {
    let speed: Vec<f64> = centroid_velocity(foot)
        .iter()
        .map(|v| Vector2::new(v.y, v.z).norm())
        .collect();
    median_filter(&speed, median_len)
}
