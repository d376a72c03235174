//! Weighted list behaviour through the public API: extraction stamps
//! positions and ingestion restores order from them.

use anyhow::{Result, anyhow, ensure};
use cdn_state::{Map, MarshalError, Record, Value, extract, ingest, schema};
use rstest::rstest;

#[derive(Debug, Default, Clone, PartialEq, Eq, Record)]
struct Rule {
    #[record(key = "path_filter")]
    path_filter: String,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Record)]
struct Rules {
    #[record(group = "delivery", block = "cache_control", weighted)]
    ordered: Vec<Rule>,
    #[record(group = "delivery", block = "access_rules")]
    unordered: Vec<Rule>,
}

fn rule(path: &str) -> Rule {
    Rule {
        path_filter: path.to_owned(),
    }
}

fn rule_entries(path: &str, weight: i64) -> Value {
    Value::Record(Map::from([
        ("path_filter".to_owned(), Value::from(path)),
        ("weight".to_owned(), Value::Int(weight)),
    ]))
}

fn block<'m>(map: &'m Map, name: &str) -> Result<&'m [Value]> {
    let inner = map
        .get("delivery")
        .and_then(Value::as_record)
        .and_then(|group| group.get(name))
        .and_then(Value::unwrap_set)
        .ok_or_else(|| anyhow!("block {name} missing"))?;
    match inner {
        Value::Sequence(elements) => Ok(elements),
        other => Err(anyhow!("block {name} is not a sequence: {other:?}")),
    }
}

#[rstest]
fn extraction_stamps_positions_on_weighted_lists_only() -> Result<()> {
    let rules = Rules {
        ordered: vec![rule("/a"), rule("/b"), rule("/c")],
        unordered: vec![rule("/x")],
    };
    let map = extract(&rules);
    let weights: Vec<Option<i64>> = block(&map, "cache_control")?
        .iter()
        .map(|element| {
            element
                .as_record()
                .and_then(|entries| entries.get("weight"))
                .and_then(Value::as_int)
        })
        .collect();
    ensure!(weights == [Some(0), Some(1), Some(2)], "weights: {weights:?}");
    let unweighted = block(&map, "access_rules")?
        .iter()
        .filter_map(Value::as_record)
        .all(|entries| !entries.contains_key("weight"));
    ensure!(unweighted, "unweighted list carries weights");
    Ok(())
}

#[rstest]
#[case::already_sorted(&[0, 1, 2], &["/0", "/1", "/2"])]
#[case::reversed(&[2, 1, 0], &["/2", "/1", "/0"])]
#[case::rotated(&[1, 2, 0], &["/2", "/0", "/1"])]
fn ingestion_orders_by_weight(#[case] weights: &[i64], #[case] expected: &[&str]) -> Result<()> {
    let elements = weights
        .iter()
        .enumerate()
        .map(|(supplied, weight)| rule_entries(&format!("/{supplied}"), *weight))
        .collect();
    let map = Map::from([(
        "cache_control".to_owned(),
        Value::set_of_one(Value::Sequence(elements)),
    )]);
    let mut rules = Rules::default();
    ingest(&mut rules, &map)?;
    let paths: Vec<&str> = rules
        .ordered
        .iter()
        .map(|item| item.path_filter.as_str())
        .collect();
    ensure!(paths == expected, "unexpected order: {paths:?}");
    Ok(())
}

#[rstest]
#[case::duplicate(&[0, 0], MarshalError::DuplicateWeight { block: "cache_control".to_owned(), weight: 0 })]
#[case::gap(&[0, 2], MarshalError::WeightOutOfRange { block: "cache_control".to_owned(), weight: 2, len: 2 })]
#[case::negative(&[-1], MarshalError::WeightOutOfRange { block: "cache_control".to_owned(), weight: -1, len: 1 })]
fn malformed_weights_are_rejected(#[case] weights: &[i64], #[case] expected: MarshalError) {
    let elements = weights
        .iter()
        .map(|weight| rule_entries("/", *weight))
        .collect();
    let map = Map::from([("cache_control".to_owned(), Value::Sequence(elements))]);
    let mut rules = Rules {
        ordered: vec![rule("/kept")],
        ..Rules::default()
    };
    assert_eq!(ingest(&mut rules, &map), Err(expected));
    assert_eq!(rules.ordered, [rule("/kept")]);
}

#[rstest]
fn string_weights_are_type_mismatches() {
    let element = Value::Record(Map::from([("weight".to_owned(), Value::from("0"))]));
    let map = Map::from([(
        "cache_control".to_owned(),
        Value::Sequence(vec![element]),
    )]);
    let mut rules = Rules::default();
    assert_eq!(
        ingest(&mut rules, &map),
        Err(MarshalError::TypeMismatch {
            field: "cache_control[0].weight".to_owned(),
            expected: "int",
            found: "string",
        })
    );
}

#[rstest]
fn extract_then_ingest_preserves_order() -> Result<()> {
    let rules = Rules {
        ordered: vec![rule("/z"), rule("/a"), rule("/m")],
        unordered: vec![rule("/2"), rule("/1")],
    };
    let mut restored = Rules::default();
    ingest(&mut restored, &extract(&rules))?;
    ensure!(restored == rules, "order changed: {restored:?}");
    Ok(())
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Record)]
struct Ranked {
    #[record(key = "weight")]
    weight: i64,
    #[record(key = "name")]
    name: String,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Record)]
struct Ranking {
    #[record(group = "delivery", block = "ranked", weighted)]
    items: Vec<Ranked>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Record)]
struct Listing {
    #[record(group = "delivery", block = "listed")]
    items: Vec<Ranked>,
}

fn ranked(weight: i64, name: &str) -> Ranked {
    Ranked {
        weight,
        name: name.to_owned(),
    }
}

#[rstest]
fn weighted_elements_may_not_tag_the_weight_key() -> Result<()> {
    let ranking = Ranking {
        items: vec![ranked(50, "a"), ranked(10, "b")],
    };
    let map = extract(&ranking);
    ensure!(map.is_empty(), "colliding list was emitted: {map:?}");
    ensure!(
        schema::check(&ranking)
            == Err(MarshalError::ReservedKey {
                field: "items".to_owned(),
                key: "weight".to_owned(),
            }),
        "schema check accepted the colliding list"
    );

    let element = Value::Record(Map::from([
        ("weight".to_owned(), Value::Int(0)),
        ("name".to_owned(), Value::from("a")),
    ]));
    let supplied = Map::from([("ranked".to_owned(), Value::Sequence(vec![element]))]);
    let mut restored = ranking.clone();
    let outcome = ingest(&mut restored, &supplied);
    ensure!(
        outcome
            == Err(MarshalError::ReservedKey {
                field: "ranked[0]".to_owned(),
                key: "weight".to_owned(),
            }),
        "unexpected outcome: {outcome:?}"
    );
    ensure!(restored == ranking, "list partially replaced: {restored:?}");
    Ok(())
}

#[rstest]
fn unweighted_elements_may_use_the_weight_key() -> Result<()> {
    let listing = Listing {
        items: vec![ranked(50, "a"), ranked(10, "b")],
    };
    schema::check(&listing)?;
    let mut restored = Listing::default();
    ingest(&mut restored, &extract(&listing))?;
    ensure!(restored == listing, "scalars lost: {restored:?}");
    Ok(())
}
