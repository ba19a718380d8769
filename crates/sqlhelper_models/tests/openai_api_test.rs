use sqlhelper_core::{GenerateRequest, Message, Prompt, QueryText, Role, SchemaText};
use sqlhelper_interface::LlmDriver;
use sqlhelper_models::{DEFAULT_OPENAI_MODEL, OpenAiClient};

fn client_from_env() -> anyhow::Result<OpenAiClient> {
    dotenvy::dotenv().ok();
    let api_key = std::env::var("OPENAI_API_KEY")?;
    Ok(OpenAiClient::new(api_key, DEFAULT_OPENAI_MODEL))
}

#[tokio::test]
#[cfg_attr(not(feature = "api"), ignore)]
async fn test_openai_basic_generation() -> anyhow::Result<()> {
    let client = client_from_env()?;

    let request = GenerateRequest::builder()
        .messages(vec![Message::new(Role::User, "Reply with the word pong.")])
        .max_tokens(Some(5))
        .build()?;

    let response = client.generate(&request).await?;

    assert!(response.first_text().is_some(), "Should receive text");
    println!("Response: {:?}", response.first_text());
    Ok(())
}

#[tokio::test]
#[cfg_attr(not(feature = "api"), ignore)]
async fn test_openai_answers_schema_prompt_with_sql() -> anyhow::Result<()> {
    let client = client_from_env()?;

    let schema = SchemaText::new("CREATE TABLE users (id serial PRIMARY KEY, email text NOT NULL);");
    let prompt = Prompt::new(&schema, &QueryText::Question("How many users are there?".into()));
    let request = GenerateRequest::builder()
        .messages(prompt.into_messages())
        .build()?;

    let response = client.generate(&request).await?;
    let text = response.first_text().unwrap_or_default().to_uppercase();

    assert!(text.contains("SELECT"), "Expected SQL, got: {text}");
    assert!(text.contains("USERS"), "Expected the users table, got: {text}");
    Ok(())
}

#[tokio::test]
#[cfg_attr(not(feature = "api"), ignore)]
async fn test_openai_rejects_bad_key() -> anyhow::Result<()> {
    let client = OpenAiClient::new("sk-invalid", DEFAULT_OPENAI_MODEL);

    let request = GenerateRequest::builder()
        .messages(vec![Message::new(Role::User, "hello")])
        .build()?;

    let result = client.generate(&request).await;
    assert!(result.is_err(), "Invalid key must fail");
    Ok(())
}
