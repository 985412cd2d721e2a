use georef_matrix::{matrices, AffineTransform2D, Envelope, GeneralMatrix, Matrix};

#[test]
fn matrix_json_roundtrip() -> Result<(), Box<dyn std::error::Error>> {
    let fixed = matrices::create(2, 2, &[1.0, 2.0, 0.0, 1.0])?;
    let general = Matrix::General(GeneralMatrix::from_rows(&[[1.0, 0.0, 3.0], [0.0, 1.0, 4.0]])?);

    for m in [fixed, general] {
        let json = serde_json::to_string(&m)?;
        let back: Matrix = serde_json::from_str(&json)?;
        assert_eq!(back, m);
        assert!(back.same_representation(&m));
    }
    Ok(())
}

#[test]
fn affine_and_envelope_json_roundtrip() -> Result<(), Box<dyn std::error::Error>> {
    let affine = AffineTransform2D::new(2.0, 0.5, 10.0, 0.0, -2.0, 20.0);
    let back: AffineTransform2D = serde_json::from_str(&serde_json::to_string(&affine)?)?;
    assert_eq!(back, affine);

    let envelope = Envelope::new(vec![-180.0, -90.0], vec![180.0, 90.0])?;
    let back: Envelope = serde_json::from_str(&serde_json::to_string(&envelope)?)?;
    assert_eq!(back, envelope);
    Ok(())
}
