use maillist_model::{
    CampaignId, FilterCondition, ListId, Operator, Record, RecordData, UserId,
};
use maillist_segment::{SegmentFilter, condition_matches, explain};
use proptest::prelude::*;

fn record(pairs: &[(&str, &str)]) -> Record {
    let data: RecordData = pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
    Record::new(
        ListId::new("list-1").unwrap(),
        CampaignId::new("campaign-1").unwrap(),
        UserId::new("user-1").unwrap(),
        data,
    )
}

fn boston_fixture() -> Vec<Record> {
    vec![
        record(&[("Email", "a@x.com"), ("City", "Boston")]),
        record(&[("Email", "b@x.com")]),
    ]
}

#[test]
fn equals_excludes_records_without_the_field() {
    let records = boston_fixture();
    let conditions = vec![FilterCondition::new("City", Operator::Equals, "Boston")];
    let matched = SegmentFilter::new(&conditions).apply(&records);
    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0].value("Email"), Some("a@x.com"));
}

#[test]
fn not_equals_does_not_pass_missing_fields() {
    let records = boston_fixture();
    let conditions = vec![FilterCondition::new("City", Operator::NotEquals, "Boston")];
    assert!(SegmentFilter::new(&conditions).evaluate(records).is_empty());
}

#[test]
fn case_asymmetry_between_operators() {
    let records = boston_fixture();
    let exact = vec![FilterCondition::new("City", Operator::Equals, "boston")];
    let partial = vec![FilterCondition::new("City", Operator::Contains, "bos")];
    assert!(SegmentFilter::new(&exact).apply(&records).is_empty());
    assert_eq!(SegmentFilter::new(&partial).apply(&records).len(), 1);
}

#[test]
fn result_keeps_input_order() {
    let records = vec![
        record(&[("Email", "c@x.org")]),
        record(&[("Email", "a@x.com")]),
        record(&[("Email", "b@x.org")]),
    ];
    let conditions = vec![FilterCondition::new("Email", Operator::EndsWith, ".ORG")];
    let emails: Vec<&str> = SegmentFilter::new(&conditions)
        .apply(&records)
        .iter()
        .filter_map(|r| r.value("Email"))
        .collect();
    assert_eq!(emails, vec!["c@x.org", "b@x.org"]);
}

#[test]
fn explain_separates_missing_from_mismatched() {
    let records = boston_fixture();
    let conditions = vec![
        FilterCondition::new("City", Operator::Equals, "Chicago"),
        FilterCondition::new("Email", Operator::Contains, "@"),
    ];
    let stats = explain(&conditions, &records);
    assert_eq!(stats[0].satisfied, 0);
    assert_eq!(stats[0].missing_field, 1);
    assert_eq!(stats[0].failed(records.len()), 2);
    assert_eq!(stats[1].satisfied, 2);
}

fn operator_strategy() -> impl Strategy<Value = Operator> {
    prop::sample::select(Operator::ALL.to_vec())
}

fn condition_strategy() -> impl Strategy<Value = FilterCondition> {
    ("[ab]", operator_strategy(), "[aAbB]{0,2}")
        .prop_map(|(field, operator, value)| FilterCondition::new(field, operator, value))
}

fn record_strategy() -> impl Strategy<Value = Record> {
    prop::collection::btree_map("[abc]", "[aAbB]{0,3}", 0..3).prop_map(|data| {
        Record::new(
            ListId::new("list-1").unwrap(),
            CampaignId::new("campaign-1").unwrap(),
            UserId::new("user-1").unwrap(),
            data,
        )
    })
}

proptest! {
    #[test]
    fn result_is_exactly_the_conjunction(
        records in prop::collection::vec(record_strategy(), 0..12),
        conditions in prop::collection::vec(condition_strategy(), 0..4),
    ) {
        let filter = SegmentFilter::new(&conditions);
        let matched: Vec<&Record> = filter.apply(&records);
        let expected: Vec<&Record> = records
            .iter()
            .filter(|r| conditions.iter().all(|c| condition_matches(&r.data, c)))
            .collect();
        prop_assert_eq!(&matched, &expected);
        if conditions.is_empty() {
            prop_assert_eq!(matched.len(), records.len());
        }
    }

    #[test]
    fn missing_field_never_matches(
        record in record_strategy(),
        operator in operator_strategy(),
        value in "[aAbB]{0,2}",
    ) {
        let condition = FilterCondition::new("zzz", operator, value);
        prop_assert!(!condition_matches(&record.data, &condition));
    }
}
