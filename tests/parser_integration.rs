//! Integration tests for the HTML extractor using a fixture page.

use amz_desk::amazon::parser::Parser;
use amz_desk::amazon::{AmazonClient, AmazonSearch, ScrapeError};
use amz_desk::commands::SearchCommand;
use amz_desk::Config;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SEARCH_FIXTURE: &str = include_str!("fixtures/search_result.html");

#[test]
fn test_parse_search_results() {
    let parser = Parser::new(73.5);
    let results = parser.parse_search(SEARCH_FIXTURE, "wireless mouse").unwrap();

    // Three extractable cards; one has no price block, one has a digitless price
    assert_eq!(results.count(), 3);
    assert_eq!(results.skipped.missing_fields, 1);
    assert_eq!(results.skipped.unparseable_price, 1);

    let product = &results.products[0];
    assert!(product.title.contains("Logitech"));
    assert_eq!(product.price_inr, 735.0);
    assert_eq!(
        product.link,
        "https://www.amazon.com/Logitech-MX-Master-3-Advanced/dp/B08N5WRWNW/ref=sr_1_1"
    );

    // Already-absolute hrefs pass through untouched
    let product = &results.products[1];
    assert!(product.title.contains("Razer"));
    assert_eq!(product.price_inr, 95476.5);
    assert_eq!(product.link, "https://www.amazon.com/Razer-Basilisk-Ultimate/dp/B09HMZ6S1Y");

    let product = &results.products[2];
    assert!(product.title.contains("Anker"));
    assert_eq!(product.price_inr, 183.75);
}

#[test]
fn test_parse_search_results_rate_applied() {
    let parser = Parser::new(80.0);
    let results = parser.parse_search(SEARCH_FIXTURE, "wireless mouse").unwrap();

    assert_eq!(results.products[0].price_inr, 800.0);
}

#[tokio::test]
async fn test_search_command_end_to_end() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/s"))
        .and(query_param("k", "wireless mouse"))
        .and(query_param("low-price", "1.36"))
        .and(query_param("high-price", "680.27"))
        .respond_with(ResponseTemplate::new(200).set_body_string(SEARCH_FIXTURE))
        .mount(&mock_server)
        .await;

    let config = Config::default();
    let client = AmazonClient::with_base_url(&config, Some(mock_server.uri())).await.unwrap();
    let cmd = SearchCommand::new(config);

    let products =
        cmd.execute_with_client(&client, "wireless mouse", 100.0, 50000.0).await.unwrap();

    assert_eq!(products.len(), 3);
    assert!(products[0].title.contains("Logitech"));
    assert!(products.iter().all(|p| p.link.starts_with("https://www.amazon.com")));
}

#[tokio::test]
async fn test_search_command_captcha_page() {
    let mock_server = MockServer::start().await;

    let captcha = r#"<html><body>
        <form method="get" action="/errors/validateCaptcha">
            <img src="https://images-na.ssl-images-amazon.com/captcha/usvmgloq/Captcha_kwrrnqwkph.jpg">
        </form>
    </body></html>"#;

    Mock::given(method("GET"))
        .and(path("/s"))
        .respond_with(ResponseTemplate::new(200).set_body_string(captcha))
        .mount(&mock_server)
        .await;

    let config = Config::default();
    let client = AmazonClient::with_base_url(&config, Some(mock_server.uri())).await.unwrap();
    let cmd = SearchCommand::new(config);

    let err = cmd.execute_with_client(&client, "anything", 100.0, 200.0).await.unwrap_err();
    assert!(matches!(err.downcast_ref::<ScrapeError>(), Some(ScrapeError::Captcha)));
}
