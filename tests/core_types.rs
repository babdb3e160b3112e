use detpost::{
    find_clusters, non_max_suppression_aabb, BoxesView, DetPostError, MergeConfig, PointsView,
    SuppressConfig, Target,
};

#[test]
fn boxes_view_rejects_short_rows() {
    let data = [0.0f32; 8];

    let err = BoxesView::from_slice(&data, 4, 2).err().unwrap();
    assert_eq!(
        err,
        DetPostError::InvalidShape {
            context: "box row length (coordinates plus score)",
            value: 2,
        }
    );
}

#[test]
fn boxes_view_rejects_small_buffer() {
    let data = [0.0f32; 9];

    let err = BoxesView::from_slice(&data, 2, 5).err().unwrap();
    assert_eq!(err, DetPostError::BufferTooSmall { needed: 10, got: 9 });
}

#[test]
fn boxes_view_exposes_coords_and_scores() {
    let data = [1.0f32, 2.0, 3.0, 4.0, 0.9, 5.0, 6.0, 7.0, 8.0, 0.8];
    let view = BoxesView::from_slice(&data, 2, 5).unwrap();

    assert_eq!(view.len(), 2);
    assert_eq!(view.row_len(), 5);
    assert_eq!(view.coords(0).unwrap(), &[1.0, 2.0, 3.0, 4.0]);
    assert_eq!(view.score(1), Some(0.8));
    assert!(view.coords(2).is_none());
    assert!(view.score(2).is_none());
}

#[test]
fn points_view_rejects_zero_dims() {
    let data = [0.0f64; 4];

    let err = PointsView::from_slice(&data, 2, 2, 0).err().unwrap();
    assert_eq!(
        err,
        DetPostError::InvalidShape {
            context: "point dimensionality",
            value: 0,
        }
    );
}

#[test]
fn points_view_rejects_small_buffer() {
    let data = [0.0f64; 11];

    let err = PointsView::from_slice(&data, 2, 2, 3).err().unwrap();
    assert_eq!(err, DetPostError::BufferTooSmall { needed: 12, got: 11 });
}

#[test]
fn points_view_slices_batches() {
    let data: Vec<f32> = (0..12).map(|v| v as f32).collect();
    let view = PointsView::from_slice(&data, 2, 3, 2).unwrap();

    assert_eq!(view.batches(), 2);
    assert_eq!(view.points_per_batch(), 3);
    assert_eq!(view.dims(), 2);
    assert_eq!(view.batch(0).unwrap(), &[0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
    assert_eq!(view.batch(1).unwrap(), &[6.0, 7.0, 8.0, 9.0, 10.0, 11.0]);
    assert!(view.batch(2).is_none());
}

#[test]
fn suppression_refuses_non_cpu_targets() {
    let data = [0.0f32, 0.0, 1.0, 1.0, 0.9];
    let view = BoxesView::with_target(&data, 1, 5, Target::Cuda).unwrap();

    let err = non_max_suppression_aabb(view, &SuppressConfig::new(0.5, 0.0))
        .err()
        .unwrap();
    assert_eq!(
        err,
        DetPostError::UnsupportedExecutionTarget {
            target: Target::Cuda,
        }
    );
}

#[test]
fn clustering_refuses_non_cpu_targets() {
    let data = [0.0f64; 6];
    let view = PointsView::with_target(&data, 1, 2, 3, Target::Cuda).unwrap();

    let err = find_clusters(view, &MergeConfig::default()).err().unwrap();
    assert_eq!(
        err,
        DetPostError::UnsupportedExecutionTarget {
            target: Target::Cuda,
        }
    );
}

#[test]
fn invalid_configs_fail_before_any_work() {
    let data = [0.0f32; 6];
    let view = PointsView::from_slice(&data, 1, 2, 3).unwrap();

    let err = find_clusters(
        view,
        &MergeConfig {
            iterations: 0,
            ..MergeConfig::default()
        },
    )
    .err()
    .unwrap();
    assert_eq!(
        err,
        DetPostError::InvalidConfig {
            reason: "iterations must be at least 1",
        }
    );

    let err = find_clusters(
        view,
        &MergeConfig {
            bandwidth: -1.0,
            ..MergeConfig::default()
        },
    )
    .err()
    .unwrap();
    assert_eq!(
        err,
        DetPostError::InvalidConfig {
            reason: "bandwidth must be positive and finite",
        }
    );

    let boxes = [0.0f32, 0.0, 1.0, 1.0, 0.9];
    let box_view = BoxesView::from_slice(&boxes, 1, 5).unwrap();
    let err = non_max_suppression_aabb(box_view, &SuppressConfig::new(f32::NAN, 0.0))
        .err()
        .unwrap();
    assert_eq!(
        err,
        DetPostError::InvalidConfig {
            reason: "thresh must be finite",
        }
    );
}
