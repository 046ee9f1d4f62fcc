//! Integration tests for the service-first interpreter using stub services.

use std::cell::RefCell;
use std::rc::Rc;

use stockroom_agent::{
    AgentError, CompletionService, Interpreter, ServiceError, Source, build_prompt,
};
use stockroom_core::{Command, ItemPatch};

/// Replies with a fixed text and records every prompt it receives.
struct CannedService {
    reply: String,
    prompts: Rc<RefCell<Vec<String>>>,
}

impl CannedService {
    fn new(reply: &str) -> (Self, Rc<RefCell<Vec<String>>>) {
        let prompts = Rc::new(RefCell::new(Vec::new()));
        let service = Self {
            reply: reply.to_string(),
            prompts: Rc::clone(&prompts),
        };
        (service, prompts)
    }
}

impl CompletionService for CannedService {
    fn complete(&self, prompt: &str) -> Result<String, ServiceError> {
        self.prompts.borrow_mut().push(prompt.to_string());
        Ok(self.reply.clone())
    }
}

/// Always fails as if the network were down.
struct DownService;

impl CompletionService for DownService {
    fn complete(&self, _prompt: &str) -> Result<String, ServiceError> {
        Err(ServiceError::StatusError {
            status: 503,
            body: "unavailable".to_string(),
        })
    }
}

#[test]
fn test_valid_service_reply_is_used() {
    let (service, prompts) = CannedService::new(
        "```json\n{\"type\":\"update\",\"sku\":\"A100\",\"price\":140}\n```",
    );
    let interpreter = Interpreter::with_service(service);

    let result = interpreter.interpret("bump the apple price to 140").unwrap();
    assert_eq!(result.source, Source::Service);
    assert_eq!(
        result.command,
        Command::Update {
            sku: "A100".to_string(),
            patch: ItemPatch::default().with_price(140.0),
        }
    );

    let prompts = prompts.borrow();
    assert_eq!(prompts.len(), 1);
    assert_eq!(prompts[0], build_prompt("bump the apple price to 140"));
}

#[test]
fn test_service_reply_wins_over_rules() {
    // The rules would read this as an add; the service's answer is taken as-is.
    let (service, _) = CannedService::new(r#"{"type":"list","sku":"B300"}"#);
    let interpreter = Interpreter::with_service(service);

    let result = interpreter
        .interpret("Add 20 bananas with sku B300 price 90")
        .unwrap();
    assert_eq!(result.source, Source::Service);
    assert_eq!(
        result.command,
        Command::List {
            sku: Some("B300".to_string())
        }
    );
}

#[test]
fn test_unknown_verb_falls_back_to_rules() {
    let (service, _) = CannedService::new(r#"{"type":"restock","sku":"B300","quantity":20}"#);
    let interpreter = Interpreter::with_service(service);

    let result = interpreter
        .interpret("Add 20 bananas with sku B300 price 90")
        .unwrap();
    assert_eq!(result.source, Source::Rules);
    assert_eq!(
        result.command,
        Command::Add {
            sku: "B300".to_string(),
            name: "bananas".to_string(),
            quantity: 20,
            price: 90.0,
        }
    );
}

#[test]
fn test_prose_reply_falls_back_to_rules() {
    let (service, _) = CannedService::new("I deleted it for you!");
    let interpreter = Interpreter::with_service(service);

    let result = interpreter.interpret("delete sku Z9").unwrap();
    assert_eq!(result.source, Source::Rules);
    assert_eq!(
        result.command,
        Command::Delete {
            sku: "Z9".to_string()
        }
    );
}

#[test]
fn test_incomplete_reply_falls_back_to_rules() {
    let (service, _) = CannedService::new(r#"{"type":"subtract","sku":"A100"}"#);
    let interpreter = Interpreter::with_service(service);

    let result = interpreter.interpret("subtract 5 from sku A100").unwrap();
    assert_eq!(result.source, Source::Rules);
    assert_eq!(
        result.command,
        Command::Subtract {
            sku: "A100".to_string(),
            quantity: 5
        }
    );
}

#[test]
fn test_service_failure_falls_back_to_rules() {
    let interpreter = Interpreter::with_service(DownService);

    let result = interpreter.interpret("list").unwrap();
    assert_eq!(result.source, Source::Rules);
    assert_eq!(result.command, Command::List { sku: None });
}

#[test]
fn test_both_paths_failing_is_unparseable() {
    let interpreter = Interpreter::with_service(DownService);

    let err = interpreter.interpret("what is the weather").unwrap_err();
    assert!(matches!(err, AgentError::Unparseable { .. }));
    assert_eq!(err.kind().exit_code(), 5);
}

#[test]
fn test_empty_input_skips_the_service() {
    let (service, prompts) = CannedService::new(r#"{"type":"list"}"#);
    let interpreter = Interpreter::with_service(service);

    assert_eq!(interpreter.interpret("   "), Err(AgentError::EmptyInput));
    assert!(prompts.borrow().is_empty());
}
