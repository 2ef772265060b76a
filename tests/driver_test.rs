//! End-to-end runs of the dialog driver against an in-memory form.

use matops::{DataShape, FieldGroup, Form, Job, MatopsError, MemoryForm, Mode, SessionState, Settings, Value};

fn run(mode: Mode, first: &[f64], second: &[f64]) -> (Result<Value, MatopsError>, MemoryForm) {
    let settings = Settings::default();
    let mut form = MemoryForm::new(settings.decimals);
    let mut session = SessionState::default();
    session.configure(mode, &mut form, &settings);
    let layout = session.layout();
    form.fill(FieldGroup::First, layout.first, first).unwrap();
    if let Some(shape) = layout.second {
        form.fill(FieldGroup::Second, shape, second).unwrap();
    }
    let result = session.execute(&mut form, &settings);
    (result, form)
}

const SHIFT_X: [f64; 12] = [1.0, 0.0, 0.0, 1.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0];
const SHIFT_Y: [f64; 12] = [1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 2.0, 0.0, 0.0, 1.0, 0.0];

#[test]
fn test_multiply_writes_twelve_fields() {
    let (result, form) = run(Mode::Multiply, &SHIFT_X, &SHIFT_Y);
    assert!(result.is_ok());
    let texts = form.visible_texts(FieldGroup::Result);
    assert_eq!(texts.len(), 12);
    assert_eq!(texts[3], "1.000000");
    assert_eq!(texts[7], "2.000000");
    assert_eq!(texts[0], "1.000000");
}

#[test]
fn test_add_is_fieldwise() {
    let (result, form) = run(Mode::Add, &SHIFT_X, &SHIFT_Y);
    let Ok(Value::Matrix4(m)) = result else {
        panic!("expected a matrix result");
    };
    assert_eq!(m.fields(), [2.0, 0.0, 0.0, 1.0, 0.0, 2.0, 0.0, 2.0, 0.0, 0.0, 2.0, 0.0]);
    assert_eq!(form.text(FieldGroup::Result, 5), "2.000000");
}

#[test]
fn test_determinant_uses_nine_slot_grid() {
    let (result, form) = run(Mode::Determinant, &[2.0, 0.0, 0.0, 0.0, 3.0, 0.0, 0.0, 0.0, 4.0], &[]);
    assert_eq!(result.unwrap(), Value::Scalar(24.0));
    assert_eq!(form.visible_texts(FieldGroup::Result), vec!["24.000000"]);
    assert!(!form.is_visible(FieldGroup::First, 3));
    assert!(!form.is_visible(FieldGroup::First, 7));
    assert!(!form.is_visible(FieldGroup::First, 11));
    assert_eq!(form.text(FieldGroup::First, 4), "0");
    assert_eq!(form.text(FieldGroup::First, 5), "3");
}

#[test]
fn test_transpose_keeps_translation_fields() {
    let input = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0, 11.0, 12.0];
    let (result, _) = run(Mode::Transpose, &input, &[]);
    let Ok(Value::Matrix4(m)) = result else {
        panic!("expected a matrix result");
    };
    assert_eq!(m.fields(), [1.0, 5.0, 9.0, 4.0, 2.0, 6.0, 10.0, 8.0, 3.0, 7.0, 11.0, 12.0]);
}

#[test]
fn test_direction_modes_read_columns() {
    let input = [1.0, 2.0, 3.0, 0.0, 4.0, 5.0, 6.0, 0.0, 7.0, 8.0, 9.0, 0.0];
    let expected = [[1.0, 4.0, 7.0], [2.0, 5.0, 8.0], [3.0, 6.0, 9.0]];
    for (mode, axis) in [Mode::XDirection, Mode::YDirection, Mode::ZDirection].into_iter().zip(expected) {
        let (result, form) = run(mode, &input, &[]);
        assert_eq!(result.unwrap().values(), axis.to_vec());
        assert_eq!(form.visible_texts(FieldGroup::Result).len(), 3);
    }
}

#[test]
fn test_switching_mode_clears_previous_result() {
    let settings = Settings::default();
    let mut form = MemoryForm::default();
    let mut session = SessionState::default();
    session.configure(Mode::VectorCrossProduct, &mut form, &settings);
    form.fill(FieldGroup::First, DataShape::Vector3, &[0.0, 1.0, 0.0]).unwrap();
    form.fill(FieldGroup::Second, DataShape::Vector3, &[0.0, 0.0, 1.0]).unwrap();
    session.execute(&mut form, &settings).unwrap();
    assert_eq!(form.text(FieldGroup::Result, 0), "1.000000");

    session.configure(Mode::Determinant, &mut form, &settings);
    assert_eq!(session.mode(), Mode::Determinant);
    assert_eq!(form.text(FieldGroup::Result, 0), "");
}

#[test]
fn test_invalid_text_maps_to_invalid_input_message() {
    let settings = Settings::default();
    let mut form = MemoryForm::default();
    let mut session = SessionState::new(Mode::Transpose);
    session.configure(Mode::Transpose, &mut form, &settings);
    let err = session.execute(&mut form, &settings).unwrap_err();
    assert!(matches!(err, MatopsError::InvalidField { group: FieldGroup::First, slot: 0, .. }));
    assert_eq!(err.user_message(), "Invalid input.");
}

#[test]
fn test_job_file_drives_session() {
    let job = Job::from_toml_str(
        r#"
        mode = "z-direction"
        first = [2, 0, 0, 0,  0, 2, 0, 0,  0, 0, 5, 0]

        [settings]
        decimals = 2
        normalize_axes = true
        "#,
    )
    .unwrap();

    let mut form = MemoryForm::new(job.settings.decimals);
    let mut session = SessionState::default();
    session.configure(job.mode, &mut form, &job.settings);
    job.fill_form(session.mode(), &mut form).unwrap();
    let value = session.execute(&mut form, &job.settings).unwrap();

    assert_eq!(value.shape(), DataShape::Vector3);
    assert_eq!(form.render(FieldGroup::Result), "0.00  0.00  1.00\n");
    assert_eq!(form.read_real(FieldGroup::Result, 2).unwrap(), 1.0);
}

#[test]
fn test_job_inputs_are_not_rounded_to_display_decimals() {
    let job = Job::from_toml_str(
        r#"
        mode = "vector-cross-product"
        first = [1.04, 0.0, 0.0]
        second = [0.0, 1.04, 0.0]

        [settings]
        decimals = 1
        "#,
    )
    .unwrap();

    let mut form = MemoryForm::new(job.settings.decimals);
    let mut session = SessionState::default();
    session.configure(job.mode, &mut form, &job.settings);
    job.fill_form(session.mode(), &mut form).unwrap();
    let value = session.execute(&mut form, &job.settings).unwrap();

    let Value::Vector3(v) = value else {
        panic!("expected a vector result");
    };
    assert!((v.z() - 1.04 * 1.04).abs() < 1e-12);
    assert_eq!(form.render(FieldGroup::Result), "0.0  0.0  1.1\n");
}

#[test]
fn test_job_rejects_oversized_decimals() {
    let err = Job::from_toml_str("first = [1.0]\n[settings]\ndecimals = 70000").unwrap_err();
    assert!(matches!(err, MatopsError::Config(_)));
}
