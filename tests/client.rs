use contrib_graph::Error;
use contrib_graph::client::GraphQlClient;
use mockito::{Matcher, Server};
use serde_json::json;

fn calendar_body() -> String {
    json!({
        "data": {
            "user": {
                "contributionsCollection": {
                    "contributionCalendar": {
                        "totalContributions": 7,
                        "weeks": [
                            {
                                "contributionDays": [
                                    { "date": "2024-03-03", "contributionCount": 0, "weekday": 0 },
                                    { "date": "2024-03-04", "contributionCount": 4, "weekday": 1 }
                                ]
                            },
                            {
                                "contributionDays": [
                                    { "date": "2024-03-10", "contributionCount": 3, "weekday": 0 }
                                ]
                            }
                        ]
                    }
                }
            }
        }
    })
    .to_string()
}

#[tokio::test]
async fn test_fetch_calendar_success() {
    // 1. Setup Mock Server
    let mut server = Server::new_async().await;

    // 2. Mock: bearer auth plus the login variable in the GraphQL body
    let mock = server
        .mock("POST", "/graphql")
        .match_header("authorization", "Bearer secret-token")
        .match_header("content-type", "application/json")
        .match_header("user-agent", Matcher::Regex("^contrib-graph/".to_string()))
        .match_body(Matcher::PartialJson(json!({ "variables": { "login": "someone" } })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(calendar_body())
        .create_async()
        .await;

    // 3. Fetch
    let client = GraphQlClient::new(&format!("{}/graphql", server.url()), "secret-token").unwrap();
    let calendar = client.fetch_calendar("someone").await.unwrap();

    // 4. Assertions
    mock.assert_async().await;
    assert_eq!(calendar.total, 7);
    assert_eq!(calendar.weeks.len(), 2);
    assert_eq!(calendar.weeks[0].days.len(), 2);
    assert_eq!(calendar.weeks[0].day(1).unwrap().count, 4);
    assert_eq!(calendar.weeks[1].days[0].date, "2024-03-10");
}

#[tokio::test]
async fn test_query_asks_for_calendar_fields() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/")
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex("contributionCalendar".to_string()),
            Matcher::Regex("contributionDays".to_string()),
            Matcher::Regex("totalContributions".to_string()),
        ]))
        .with_status(200)
        .with_body(calendar_body())
        .create_async()
        .await;

    let client = GraphQlClient::new(&server.url(), "t").unwrap();
    assert!(client.fetch_calendar("someone").await.is_ok());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_non_success_status_is_transport_error() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/")
        .with_status(401)
        .with_body(r#"{"message":"Bad credentials"}"#)
        .create_async()
        .await;

    let client = GraphQlClient::new(&server.url(), "wrong").unwrap();
    let err = client.fetch_calendar("someone").await.unwrap_err();
    match &err {
        Error::Transport { status, body } => {
            assert_eq!(status.as_u16(), 401);
            assert!(body.contains("Bad credentials"));
        }
        other => panic!("expected transport error, got {:?}", other),
    }
    let message = err.to_string();
    assert!(message.contains("401"), "{}", message);
    assert!(message.contains("Bad credentials"), "{}", message);
}

#[tokio::test]
async fn test_api_errors_are_fatal() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/")
        .with_status(200)
        .with_body(
            json!({
                "data": { "user": null },
                "errors": [{ "type": "NOT_FOUND", "message": "Could not resolve to a User" }]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = GraphQlClient::new(&server.url(), "t").unwrap();
    let err = client.fetch_calendar("nobody").await.unwrap_err();
    match err {
        Error::Api(list) => {
            assert!(list.starts_with('['), "{}", list);
            assert!(list.contains("Could not resolve to a User"));
        }
        other => panic!("expected API error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unexpected_shapes() {
    let cases = [
        "not json at all",
        r#"{"data": {"user": null}}"#,
        r#"{"data": {"user": {"contributionsCollection": {}}}}"#,
        r#"{"data": {"user": {"contributionsCollection": {"contributionCalendar": {"totalContributions": 3}}}}}"#,
        r#"{}"#,
    ];
    for body in cases {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/")
            .with_status(200)
            .with_body(body)
            .create_async()
            .await;

        let client = GraphQlClient::new(&server.url(), "t").unwrap();
        let result = client.fetch_calendar("someone").await;
        assert!(
            matches!(result, Err(Error::UnexpectedShape(_))),
            "body {:?} gave {:?}",
            body,
            result
        );
    }
}

#[tokio::test]
async fn test_absent_optional_fields_default_to_zero() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/")
        .with_status(200)
        .with_body(
            json!({
                "data": { "user": { "contributionsCollection": { "contributionCalendar": {
                    "weeks": [
                        {},
                        { "contributionDays": [ { "date": "2024-01-01", "weekday": 1 } ] }
                    ]
                } } } },
                "errors": []
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = GraphQlClient::new(&server.url(), "t").unwrap();
    let calendar = client.fetch_calendar("someone").await.unwrap();
    assert_eq!(calendar.total, 0);
    assert!(calendar.weeks[0].days.is_empty());
    assert_eq!(calendar.weeks[1].days[0].count, 0);
}

#[test]
fn test_invalid_endpoint_is_config_error() {
    assert!(matches!(
        GraphQlClient::new("not a uri", "t"),
        Err(Error::InvalidConfig(_))
    ));
}

#[test]
fn test_token_that_is_not_a_header_value_is_config_error() {
    for token in ["abc\n", "a\rb", "tab\u{0}"] {
        assert!(
            matches!(
                GraphQlClient::new("http://127.0.0.1:1/", token),
                Err(Error::InvalidConfig(_))
            ),
            "token {:?} was accepted",
            token
        );
    }
}
