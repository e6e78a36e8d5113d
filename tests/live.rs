use aid_discovery::{discover, ErrorCode};
use hickory_resolver::TokioAsyncResolver;

#[tokio::test]
#[ignore = "depends on live DNS records"]
async fn discover_live_invalid_tld() {
    let _ = tracing_subscriber::fmt::try_init();

    let resolver = TokioAsyncResolver::tokio(Default::default(), Default::default());

    let config = Default::default();

    // reserved by RFC 2606, never has records
    let error = discover(&resolver, "aid.invalid", Some("mcp"), &config).await.unwrap_err();

    assert_eq!(error.code(), ErrorCode::NoRecord);
}

#[tokio::test]
#[ignore = "depends on live DNS records"]
async fn discover_live_example_com() {
    let _ = tracing_subscriber::fmt::try_init();

    let resolver = TokioAsyncResolver::tokio(Default::default(), Default::default());

    let config = Default::default();

    let error = discover(&resolver, "example.com", None, &config).await.unwrap_err();

    assert_eq!(error.code(), ErrorCode::NoRecord);
}
