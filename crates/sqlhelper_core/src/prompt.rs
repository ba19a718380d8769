//! The fixed three-message prompt sent for every generation.

use crate::{Message, Role, SchemaText};

/// System instruction sent first in every prompt.
pub const SYSTEM_INSTRUCTION: &str = "You are a helpful SQL assistant. Your job is to help the user write SQL queries.
The user will provide a database schema and a natural language query.
You will provide the SQL query that answers the question.
Respond only with the SQL query, no other text.";

/// Prefix placed before the database error when asking for a fix.
pub const REPAIR_PREFIX: &str = "The query resulted in the following error, please fix it: ";

/// What the third prompt message carries.
///
/// # Examples
///
/// ```
/// use sqlhelper_core::{QueryText, REPAIR_PREFIX};
///
/// let question = QueryText::Question("top 5 customers by revenue".into());
/// assert_eq!(question.to_prompt_text(), "top 5 customers by revenue");
///
/// let repair = QueryText::Repair("relation \"customer\" does not exist".into());
/// assert_eq!(
///     repair.to_prompt_text(),
///     format!("{REPAIR_PREFIX}relation \"customer\" does not exist"),
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryText {
    /// The user's natural-language question, verbatim
    Question(String),
    /// The error message of the last failed execution
    Repair(String),
}

impl QueryText {
    /// Render the text exactly as it goes into the prompt.
    pub fn to_prompt_text(&self) -> String {
        match self {
            QueryText::Question(question) => question.clone(),
            QueryText::Repair(error) => format!("{REPAIR_PREFIX}{error}"),
        }
    }
}

/// Ordered system instruction, schema and query messages.
///
/// Always exactly three messages; built fresh for each generation and never
/// stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    system: Message,
    schema: Message,
    query: Message,
}

impl Prompt {
    /// Build the prompt for a schema and query text.
    ///
    /// # Examples
    ///
    /// ```
    /// use sqlhelper_core::{Prompt, QueryText, Role, SchemaText, SYSTEM_INSTRUCTION};
    ///
    /// let schema = SchemaText::new("CREATE TABLE t (id int);");
    /// let prompt = Prompt::new(&schema, &QueryText::Question("count rows".into()));
    /// let messages = prompt.into_messages();
    ///
    /// assert_eq!(messages.len(), 3);
    /// assert_eq!(messages[0].role, Role::System);
    /// assert_eq!(messages[0].content, SYSTEM_INSTRUCTION);
    /// assert_eq!(messages[1].content, "CREATE TABLE t (id int);");
    /// assert_eq!(messages[2].content, "count rows");
    /// ```
    pub fn new(schema: &SchemaText, query: &QueryText) -> Self {
        Self {
            system: Message::new(Role::System, SYSTEM_INSTRUCTION),
            schema: Message::new(Role::User, schema.as_str()),
            query: Message::new(Role::User, query.to_prompt_text()),
        }
    }

    /// Borrow the messages in send order.
    pub fn messages(&self) -> [&Message; 3] {
        [&self.system, &self.schema, &self.query]
    }

    /// Consume the prompt into send-ordered messages.
    pub fn into_messages(self) -> Vec<Message> {
        vec![self.system, self.schema, self.query]
    }
}
