use approx::assert_relative_eq;
use georef_matrix::{
    matrices, AffineTransform2D, AxisDirection, Envelope, GeneralMatrix, Matrix, MatrixError,
    MatrixOps,
};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn grid_to_geographic_roundtrip() -> Result<(), MatrixError> {
    init_logger();
    use AxisDirection::*;

    // 360x180 image with rows going down onto longitude/latitude
    let grid = Envelope::new(vec![0.0, 0.0], vec![360.0, 180.0])?;
    let world = Envelope::new(vec![-180.0, -90.0], vec![180.0, 90.0])?;
    let grid_to_world =
        GeneralMatrix::from_envelopes_and_axes(&grid, &[East, South], &world, &[East, North])?;

    assert_eq!(grid_to_world.transform_point(&[0.0, 0.0])?, vec![-180.0, 90.0]);
    assert_eq!(grid_to_world.transform_point(&[360.0, 180.0])?, vec![180.0, -90.0]);

    let grid_to_world = matrices::copy(&grid_to_world);
    assert!(matches!(grid_to_world, Matrix::Size3(_)));

    let world_to_grid = matrices::invert(&grid_to_world)?;
    let p = world_to_grid.transform_point(&[0.0, 0.0])?;
    assert_relative_eq!(p[0], 180.0);
    assert_relative_eq!(p[1], 90.0);

    let identity = matrices::multiply(&grid_to_world, &world_to_grid)?;
    assert!(identity.is_identity_within(1e-12));
    Ok(())
}

#[test]
fn dropped_time_dimension_comes_back_as_independent() -> Result<(), MatrixError> {
    init_logger();

    // (lon, lat, time) -> (lon, lat)
    let filter = matrices::create_dimension_filter(3, &[0, 1])?;
    let inverse = matrices::invert(&filter)?;
    assert_eq!((inverse.num_rows(), inverse.num_cols()), (4, 3));

    let p = inverse.transform_point(&[10.0, 20.0])?;
    assert_eq!(p[0], 10.0);
    assert_eq!(p[1], 20.0);
    assert!(p[2].is_nan());
    Ok(())
}

#[test]
fn constant_height_is_ignored_by_the_inverse() -> Result<(), MatrixError> {
    init_logger();

    // (x, y) -> (x / 2, y / 2, 0)
    let mut m = GeneralMatrix::from_rows(&[
        [0.5, 0.0, 0.0],
        [0.0, 0.5, 0.0],
        [0.0, 0.0, 0.0],
        [0.0, 0.0, 1.0],
    ])?;
    m.invert()?;
    assert_eq!((m.num_rows(), m.num_cols()), (3, 4));
    assert_eq!(m.transform_point(&[1.0, 2.0, 123.0])?, vec![2.0, 4.0]);
    Ok(())
}

#[test]
fn axis_swap_then_scale_matches_sequential_transform() -> Result<(), MatrixError> {
    use AxisDirection::*;

    let swap = Matrix::from(GeneralMatrix::from_axis_directions(
        &[North, East],
        &[East, North],
    )?);
    let scale = Matrix::from(AffineTransform2D::new(2.0, 0.0, 100.0, 0.0, 3.0, -50.0).to_matrix());

    // scale applied after swap
    let combined = matrices::multiply(&scale, &matrices::copy(&swap))?;
    let point = [7.0, 11.0];
    let expected = scale.transform_point(&swap.transform_point(&point)?)?;
    assert_eq!(combined.transform_point(&point)?, expected);
    assert_eq!(expected, vec![122.0, -29.0]);
    Ok(())
}

#[test]
fn pass_through_keeps_the_other_dimensions() -> Result<(), MatrixError> {
    let affine = AffineTransform2D::new(0.0, -1.0, 5.0, 1.0, 0.0, 0.0).to_matrix();
    let m = matrices::create_pass_through(0, &affine, 1);
    assert!(matches!(m, Matrix::Size4(_)));

    let p = m.transform_point(&[1.0, 2.0, 3.0])?;
    assert_eq!(p, vec![3.0, 1.0, 3.0]);

    let inverse = matrices::invert(&m)?;
    let q = inverse.transform_point(&p)?;
    assert_relative_eq!(q[0], 1.0, epsilon = 1e-12);
    assert_relative_eq!(q[1], 2.0, epsilon = 1e-12);
    assert_relative_eq!(q[2], 3.0, epsilon = 1e-12);
    Ok(())
}

#[test]
fn resize_then_reverse_axis() -> Result<(), MatrixError> {
    let m = matrices::create(3, 3, &[2.0, 0.0, 10.0, 0.0, 2.0, 20.0, 0.0, 0.0, 1.0])?;
    let mut m = matrices::resize_affine(&m, 3, 3)?;
    assert!(m.is_affine());
    assert_eq!(m.transform_point(&[1.0, 1.0, 5.0])?, vec![12.0, 22.0, 5.0]);

    // the vertical axis now points down over a 100 units range
    matrices::reverse_axis_direction(&mut m, 2, 100.0)?;
    assert_eq!(m.transform_point(&[1.0, 1.0, 5.0])?, vec![12.0, 22.0, 95.0]);
    Ok(())
}

#[test]
fn rounding_errors_are_filtered_after_concatenation() -> Result<(), MatrixError> {
    let a = matrices::create(3, 3, &[0.1, 0.0, 0.3, 0.0, 0.1, 0.7, 0.0, 0.0, 1.0])?;
    let mut b = matrices::invert(&a)?;
    b.multiply(&matrices::create(3, 3, &[3.0, 0.0, 0.0, 0.0, 3.0, 0.0, 0.0, 0.0, 1.0])?)?;
    matrices::filter_rounding_errors(&mut b, 1.0, 1e-12)?;
    assert_eq!(
        b.elements(),
        vec![30.0, 0.0, -3.0, 0.0, 30.0, -7.0, 0.0, 0.0, 1.0]
    );
    Ok(())
}
