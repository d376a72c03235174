//! End-to-end coverage of extracting a configuration and ingesting it back,
//! including a trip through the state store's JSON form.

use anyhow::{Result, anyhow, ensure};
use cdn_state::model::{
    CacheControl, Compression, Configuration, Modification, OriginPullHost, StaticHeader,
};
use cdn_state::{MarshalOptions, Marshaller, Value, extract, ingest};
use rstest::rstest;

fn sample() -> Configuration {
    let mut config = Configuration::baseline();
    config.compression = Some(Compression {
        enabled: true,
        gzip: "js,css".to_owned(),
        level: Some(6),
        mime: "text/*".to_owned(),
    });
    config.static_header = vec![
        StaticHeader {
            enabled: true,
            http: "X-First: 1".to_owned(),
            ..StaticHeader::default()
        },
        StaticHeader {
            enabled: true,
            http: "X-Second: 2".to_owned(),
            path_filter: "/static/*".to_owned(),
            ..StaticHeader::default()
        },
    ];
    config.cache_control.push(CacheControl {
        enabled: true,
        max_age: 60,
        override_origin: true,
        path_filter: "/api/*".to_owned(),
        ..CacheControl::default()
    });
    config.origin_pull_host = Some(OriginPullHost {
        primary: 11,
        secondary: 12,
        path: "/origin".to_owned(),
    });
    config.client_request_modification = vec![Modification {
        enabled: true,
        url_pattern: "/old/(.*)".to_owned(),
        url_rewrite: "/new/$1".to_owned(),
        ..Modification::default()
    }];
    config
}

#[rstest]
fn configuration_survives_a_round_trip() -> Result<()> {
    let configuration = sample();
    let map = extract(&configuration);
    let mut restored = Configuration::default();
    ingest(&mut restored, &map)?;
    ensure!(restored == configuration, "round trip lost data: {restored:#?}");
    Ok(())
}

#[rstest]
fn configuration_survives_the_json_form() -> Result<()> {
    let configuration = sample();
    let json = serde_json::to_string(&extract(&configuration))?;
    let map: cdn_state::Map = serde_json::from_str(&json)?;
    let mut restored = Configuration::default();
    ingest(&mut restored, &map)?;
    ensure!(restored == configuration, "JSON trip lost data: {restored:#?}");
    Ok(())
}

#[rstest]
fn extraction_is_deterministic() {
    let configuration = sample();
    assert_eq!(extract(&configuration), extract(&configuration.clone()));
}

#[rstest]
fn every_group_is_emitted() {
    let configuration = sample();
    let map = extract(&configuration);
    let groups: Vec<&str> = map.keys().map(String::as_str).collect();
    assert_eq!(groups, ["delivery", "modification", "origin"]);
}

#[rstest]
fn string_encoded_level_is_an_int_in_the_state_map() -> Result<()> {
    let configuration = sample();
    let map = extract(&configuration);
    let level = map
        .get("delivery")
        .and_then(Value::as_record)
        .and_then(|group| group.get("compression"))
        .and_then(Value::unwrap_set)
        .and_then(Value::as_record)
        .and_then(|block| block.get("level"))
        .ok_or_else(|| anyhow!("compression level missing"))?;
    ensure!(*level == Value::Int(6), "unexpected level: {level:?}");
    Ok(())
}

#[rstest]
fn custom_weight_key_round_trips() -> Result<()> {
    let configuration = sample();
    let marshaller = Marshaller::new(MarshalOptions {
        weight_key: "position".to_owned(),
        ..MarshalOptions::default()
    });
    let map = marshaller.extract(&configuration);
    let rendered = serde_json::to_value(&map)?;
    ensure!(
        rendered.pointer("/delivery/static_header/0/1/position") == Some(&serde_json::json!(1)),
        "position key missing: {rendered}"
    );
    let mut restored = Configuration::default();
    marshaller.ingest(&mut restored, &map)?;
    ensure!(restored == configuration, "custom key lost data");
    Ok(())
}

#[rstest]
fn strict_marshaller_accepts_its_own_output() -> Result<()> {
    let configuration = sample();
    let marshaller = Marshaller::new(MarshalOptions {
        deny_unknown_keys: true,
        ..MarshalOptions::default()
    });
    let map = marshaller.extract(&configuration);
    let mut restored = Configuration::default();
    marshaller.ingest(&mut restored, &map)?;
    ensure!(restored == configuration, "strict ingest lost data");
    Ok(())
}
