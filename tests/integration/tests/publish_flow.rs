//! Client-built instructions driving the on-chain publish pipeline

use book_oracle_bridge::fixtures::FeedFixture;
use book_oracle_bridge::processor::{plan_publish, PARAMS, PAYER};
use book_oracle_bridge::state::PriceStatus;
use book_oracle_bridge::PublishPolicy;
use book_oracle_client::{build_publish_instruction, PolicyConfig};
use book_oracle_common::BridgeError;
use book_oracle_integration_tests::{feed_config, views_for_instruction};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn test_client_instruction_is_accepted() {
    init_logger();

    let fixture = FeedFixture::new();
    let config = feed_config(&fixture, None);
    let feed = config.resolve().unwrap();
    let ix = build_publish_instruction(&feed, config.publish_policy().unwrap().as_ref());

    assert_eq!(ix.program_id.to_bytes(), book_oracle_bridge::ID);

    let views = views_for_instruction(&fixture, &ix).expect("all keys resolve");
    let policy = PublishPolicy::from_instruction_data(&ix.data).unwrap();
    let plan = plan_publish(&views, &policy).unwrap();

    assert_eq!(plan.command.status, PriceStatus::Trading);
    assert_eq!(plan.command.price, 1);
    assert_eq!(plan.outbound.len(), 3);
}

#[test]
fn test_client_policy_reaches_pipeline() {
    init_logger();

    let mut fixture = FeedFixture::new();
    fixture.set_best_prices(Some(100), Some(200));

    // Default policy: spread is a third of the price, too wide
    let config = feed_config(&fixture, None);
    let ix = build_publish_instruction(&config.resolve().unwrap(), None);
    let views = views_for_instruction(&fixture, &ix).unwrap();
    let policy = PublishPolicy::from_instruction_data(&ix.data).unwrap();
    assert_eq!(plan_publish(&views, &policy).unwrap().command.status, PriceStatus::Unknown);

    // Limit disabled through the config
    let config = feed_config(&fixture, Some(PolicyConfig { fee_bps: 10, max_conf_bps: 0 }));
    let policy_cfg = config.publish_policy().unwrap();
    let ix = build_publish_instruction(&config.resolve().unwrap(), policy_cfg.as_ref());
    assert_eq!(ix.data.len(), 4);
    let views = views_for_instruction(&fixture, &ix).unwrap();
    let policy = PublishPolicy::from_instruction_data(&ix.data).unwrap();
    let plan = plan_publish(&views, &policy).unwrap();
    assert_eq!(plan.command.status, PriceStatus::Trading);
    assert_eq!(plan.command.price, 150);
}

#[test]
fn test_client_param_account_variant() {
    init_logger();

    let fixture = FeedFixture::with_params();
    let config = feed_config(&fixture, None);
    let ix = build_publish_instruction(&config.resolve().unwrap(), None);
    assert_eq!(ix.accounts.len(), 11);

    let views = views_for_instruction(&fixture, &ix).unwrap();
    let plan = plan_publish(&views, &PublishPolicy::default()).unwrap();
    assert_eq!(plan.outbound.len(), 4);
    assert_eq!(plan.outbound[3].index, PARAMS);
}

#[test]
fn test_misordered_accounts_rejected() {
    init_logger();

    let fixture = FeedFixture::new();
    let config = feed_config(&fixture, None);
    let mut ix = build_publish_instruction(&config.resolve().unwrap(), None);

    // Bids and asks swapped: the market no longer points at the supplied keys
    ix.accounts.swap(4, 5);
    let views = views_for_instruction(&fixture, &ix).unwrap();
    assert_eq!(
        plan_publish(&views, &PublishPolicy::default()).err(),
        Some(BridgeError::InvalidAccountData)
    );
}

#[test]
fn test_unsigned_payer_rejected() {
    init_logger();

    let fixture = FeedFixture::new();
    let config = feed_config(&fixture, None);
    let mut ix = build_publish_instruction(&config.resolve().unwrap(), None);
    ix.accounts[PAYER].is_signer = false;

    let views = views_for_instruction(&fixture, &ix).unwrap();
    assert_eq!(
        plan_publish(&views, &PublishPolicy::default()).err(),
        Some(BridgeError::MissingRequiredSignatures)
    );
}
