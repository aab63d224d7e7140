//! Scenario tests against the built-in Google Professional Cloud Developer
//! taxonomy.

use std::sync::Arc;

use pretty_assertions::assert_eq;
use quizport_suggester::{
    ConfidenceTier, DomainSuggester, InMemoryDomainStore, KeywordTaxonomy, SuggestionRequest,
    GOOGLE_CLOUD_DEVELOPER,
};

fn suggester() -> DomainSuggester {
    DomainSuggester::new(Arc::new(KeywordTaxonomy::builtin()))
}

fn section_number(domain_name: &str) -> &str {
    domain_name.split(':').next().unwrap_or_default()
}

#[test]
fn test_microservices_question_lands_in_section_1() {
    let suggestions = suggester().suggest_domains(
        "You are developing a microservices application using Cloud Run with Cloud Load Balancing",
        GOOGLE_CLOUD_DEVELOPER,
        3,
    );

    let sections: Vec<&str> = suggestions
        .iter()
        .map(|s| section_number(&s.domain_name))
        .collect();
    assert_eq!(sections, vec!["Section 1", "Section 3", "Section 4"]);

    assert_eq!(suggestions[0].score, 28.2);
    assert_eq!(suggestions[0].confidence, 95.0);
    assert!(suggestions[0].confidence_level >= ConfidenceTier::Medium);

    assert_eq!(suggestions[1].score, 9.9);
    assert_eq!(suggestions[1].confidence_level, ConfidenceTier::Low);
    assert_eq!(suggestions[2].confidence_level, ConfidenceTier::VeryLow);
}

#[test]
fn test_testing_question_lands_in_section_2() {
    let suggestions = suggester().suggest_domains(
        "Which tool should you use to write unit tests and run them in Cloud Build?",
        GOOGLE_CLOUD_DEVELOPER,
        3,
    );
    assert_eq!(section_number(&suggestions[0].domain_name), "Section 2");
    assert_eq!(suggestions[0].confidence_level, ConfidenceTier::High);
}

#[test]
fn test_rollback_question_lands_in_section_3() {
    let suggestions = suggester().suggest_domains(
        "How do you roll back a Cloud Run revision after a failed deploy?",
        GOOGLE_CLOUD_DEVELOPER,
        3,
    );
    assert_eq!(section_number(&suggestions[0].domain_name), "Section 3");
}

#[test]
fn test_messaging_question_lands_in_section_4() {
    let suggestions = suggester().suggest_domains(
        "Your service must publish messages to Pub/Sub and handle errors with exponential backoff.",
        GOOGLE_CLOUD_DEVELOPER,
        3,
    );
    assert_eq!(section_number(&suggestions[0].domain_name), "Section 4");
}

#[test]
fn test_degenerate_inputs_return_nothing() {
    let s = suggester();
    assert!(s.suggest_domains("", GOOGLE_CLOUD_DEVELOPER, 3).is_empty());
    assert!(s
        .suggest_domains("Cloud Run with GKE", "aws_solutions_architect", 3)
        .is_empty());
}

#[test]
fn test_repeated_calls_are_identical() {
    let s = suggester();
    let text = "Store session state in Memorystore and expose APIs through Apigee";
    let first = s.suggest_domains(text, GOOGLE_CLOUD_DEVELOPER, 4);
    for _ in 0..5 {
        assert_eq!(s.suggest_domains(text, GOOGLE_CLOUD_DEVELOPER, 4), first);
    }
}

#[test]
fn test_best_domain_through_store() {
    let taxonomy = KeywordTaxonomy::builtin();
    let store = InMemoryDomainStore::from_taxonomy(&taxonomy);
    let exam = store.active_exam_by_name(GOOGLE_CLOUD_DEVELOPER).unwrap();

    let request = SuggestionRequest::new(
        "You are developing a microservices application using Cloud Run with Cloud Load Balancing",
        exam.id,
    );
    let best = suggester()
        .best_domain_for_question(&store, &request, 40.0)
        .unwrap()
        .unwrap();
    assert_eq!(section_number(&best.suggestion.domain_name), "Section 1");
    assert_eq!(best.domain_id, Some(1));
}

#[test]
fn test_suggestions_serialize_for_service_responses() {
    let suggestions = suggester().suggest_domains(
        "You are developing a microservices application using Cloud Run with Cloud Load Balancing",
        GOOGLE_CLOUD_DEVELOPER,
        1,
    );
    let json = serde_json::to_value(&suggestions).unwrap();
    assert_eq!(json[0]["confidence_level"], "High");
    assert_eq!(json[0]["confidence"], 95.0);
}
