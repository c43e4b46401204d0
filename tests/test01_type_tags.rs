use chrono::NaiveDate;
use mysql_middleware::prelude::*;
use mysql_middleware::MysqlMiddlewareError;

fn sample_timestamp() -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 9)
        .and_then(|d| d.and_hms_opt(14, 30, 5))
        .expect("valid literal timestamp")
}

#[test]
fn valid_tags_convert_in_order() -> Result<(), Box<dyn std::error::Error>> {
    let spec = ParamSpec::new(
        "isdb",
        vec![
            RowValues::Int(5),
            RowValues::Text("McLovin".into()),
            RowValues::Float(50.434),
            RowValues::Blob(vec![0x02, 0xFC, 0x03]),
        ],
    );

    let converted = spec.to_mysql_params()?;
    let mysql::Params::Positional(values) = converted else {
        panic!("expected positional parameters");
    };
    assert_eq!(values.len(), 4);
    assert_eq!(values[0], mysql::Value::Int(5));
    assert_eq!(values[1], mysql::Value::Bytes(b"McLovin".to_vec()));
    assert_eq!(values[2], mysql::Value::Double(50.434));
    assert_eq!(values[3], mysql::Value::Bytes(vec![0x02, 0xFC, 0x03]));
    Ok(())
}

#[test]
fn null_binds_under_every_tag() -> Result<(), Box<dyn std::error::Error>> {
    let spec = ParamSpec::new(
        "isdb",
        vec![
            RowValues::Null,
            RowValues::Null,
            RowValues::Null,
            RowValues::Null,
        ],
    );
    let mysql::Params::Positional(values) = spec.to_mysql_params()? else {
        panic!("expected positional parameters");
    };
    assert!(values.iter().all(|v| *v == mysql::Value::NULL));
    Ok(())
}

#[test]
fn coercions_follow_the_tag() -> Result<(), Box<dyn std::error::Error>> {
    // Bool widens under `i`, Int widens under `d`, Text bytes bind under `b`.
    let spec = ParamSpec::new(
        "idb",
        vec![
            RowValues::Bool(true),
            RowValues::Int(7),
            RowValues::Text("raw".into()),
        ],
    );
    let mysql::Params::Positional(values) = spec.to_mysql_params()? else {
        panic!("expected positional parameters");
    };
    assert_eq!(values[0], mysql::Value::Int(1));
    assert_eq!(values[1], mysql::Value::Double(7.0));
    assert_eq!(values[2], mysql::Value::Bytes(b"raw".to_vec()));
    Ok(())
}

#[test]
fn timestamp_and_json_bind_as_strings() -> Result<(), Box<dyn std::error::Error>> {
    let spec = ParamSpec::new(
        "ss",
        vec![
            RowValues::Timestamp(sample_timestamp()),
            RowValues::JSON(serde_json::json!({"k": 1})),
        ],
    );
    let mysql::Params::Positional(values) = spec.to_mysql_params()? else {
        panic!("expected positional parameters");
    };
    assert_eq!(values[0], mysql::Value::Bytes(b"2024-03-09 14:30:05".to_vec()));
    assert_eq!(values[1], mysql::Value::Bytes(br#"{"k":1}"#.to_vec()));
    Ok(())
}

#[test]
fn empty_spec_converts_to_empty_params() -> Result<(), Box<dyn std::error::Error>> {
    assert!(matches!(
        ParamSpec::empty().to_mysql_params()?,
        mysql::Params::Empty
    ));
    assert!(ParamSpec::empty().is_empty());
    Ok(())
}

#[test]
fn arity_mismatch_is_a_bind_error() {
    let spec = ParamSpec::new("is", vec![RowValues::Int(1)]);
    let err = spec.to_mysql_params().unwrap_err();
    assert!(matches!(err, MysqlMiddlewareError::BindError(_)));
    assert!(err.to_string().contains("declares 2 parameter(s)"));
}

#[test]
fn unknown_tag_char_is_a_bind_error() {
    let spec = ParamSpec::new("ix", vec![RowValues::Int(1), RowValues::Int(2)]);
    let err = spec.to_mysql_params().unwrap_err();
    assert!(matches!(err, MysqlMiddlewareError::BindError(_)));
    assert!(err.to_string().contains("unrecognized type tag `x`"));
}

#[test]
fn kind_mismatch_is_a_bind_error() {
    let spec = ParamSpec::new("i", vec![RowValues::Text("five".into())]);
    let err = spec.to_mysql_params().unwrap_err();
    assert!(matches!(err, MysqlMiddlewareError::BindError(_)));
    assert!(err.to_string().contains("cannot bind a Text value"));
}

#[test]
fn query_and_params_bundles() {
    let qp = QueryAndParams::new(
        "SELECT id FROM t WHERE id = ?",
        ParamSpec::new("i", vec![RowValues::Int(5)]),
    );
    assert_eq!(qp.params.len(), 1);
    assert_eq!(qp.params.tag(), "i");

    let bare = QueryAndParams::new_without_params("SELECT 1");
    assert!(bare.params.is_empty());
}
