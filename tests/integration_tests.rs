//! Integration tests for the resume matcher

use resume_match::config::OutputFormat;
use resume_match::input::InputManager;
use resume_match::output::{MatchReport, ReportGenerator, ReportMetadata};
use resume_match::processing::skill_matcher::SkillVocabulary;
use resume_match::{
    analyze, AnalysisEngine, AnalysisOptions, DocumentKind, KeywordMatchMode, ResumeMatchError,
    ScoringWeights,
};
use std::collections::HashSet;
use std::path::PathBuf;
use std::time::Duration;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures").join(name)
}

/// 25 job keywords, 22 of them in the resume
const WIDE_RESUME: &str = "Platform work with ansible, bigquery, cassandra, dataflow, elastic, flink, grafana, hadoop, istio, jenkins, kafka, looker, mongo, nginx, openshift, prometheus, quarkus, redis, spark, tableau, unity, vault.";
const WIDE_JD: &str = "ansible bigquery cassandra dataflow elastic flink grafana hadoop istio jenkins kafka looker mongo nginx openshift prometheus quarkus redis spark tableau unity vault webpack xcode yarn. Ansible, Bigquery, Cassandra, Dataflow, Elastic, Flink, Grafana, Hadoop, Istio, Jenkins, Kafka, Looker, Mongo, Nginx, Openshift, Prometheus, Quarkus, Redis, Spark, Tableau, Unity, Vault, Webpack, Xcode, Yarn.";

const PAIRS: &[(&str, &str)] = &[
    (WIDE_RESUME, WIDE_JD),
    (
        "Experienced developer with Python and React. Built scalable systems.",
        "Looking for Python developer with React and Docker experience. Must have built production systems.",
    ),
    (
        "Data analyst. SQL reports, SQL dashboards, Tableau dashboards. Master degree.",
        "Analyst wanted: dashboards, dashboards, dashboards. SQL and Power BI. Reports weekly, reports monthly.",
    ),
    ("x", "y"),
    ("!!! ??? ...", "Kubernetes kubernetes KUBERNETES"),
    (
        "Gardener and florist",
        "Rust Rust Rust systems systems programming programming golang golang",
    ),
];

#[test]
fn test_scenario_python_react_docker() {
    let result = analyze(
        "Experienced developer with Python and React. Built scalable systems.",
        "Looking for Python developer with React and Docker experience. Must have built production systems.",
        None,
    )
    .unwrap();

    assert_eq!(result.matched_skills, vec!["python", "react"]);
    assert_eq!(result.missing_skills, vec!["docker"]);
    assert!(result.signals.has_experience_markers);

    // No job description token repeats, so there are no keywords to match
    assert!(result.matched_keywords.is_empty());
    assert!(result.missing_keywords.is_empty());
    assert_eq!(result.scores.keyword_match, 0);
    assert_eq!(result.scores.skills_match, 67);
    assert_eq!(result.match_percentage, 33);
}

#[test]
fn test_scenario_both_empty() {
    let err = analyze("", "", None).unwrap_err();

    assert!(matches!(err, ResumeMatchError::EmptyDocument(DocumentKind::Resume)));
    assert_eq!(err.to_string(), "Resume text is empty");
}

#[test]
fn test_scenario_no_vocabulary_skills() {
    let jd = "Friendly barista wanted. Barista shifts on weekends, espresso and latte art.";

    for resume in ["Python, Docker and Kubernetes expert", "Barista with espresso skills", "nothing"] {
        let result = analyze(resume, jd, None).unwrap();
        assert_eq!(result.scores.skills_match, 50);
        assert!(result.matched_skills.is_empty());
        assert!(result.missing_skills.is_empty());
    }
}

#[test]
fn test_scenario_identical_documents() {
    let text = "Senior Python engineer. Python and Docker experience. Docker pipelines. \
                Bachelor degree in computer science.";

    let result = analyze(text, text, None).unwrap();

    assert!(result.missing_keywords.is_empty());
    assert!(result.missing_skills.is_empty());
    assert_eq!(result.matched_keywords, vec!["python", "docker"]);
    assert_eq!(result.scores.keyword_match, 100);
    assert_eq!(result.scores.skills_match, 100);
    // 100*0.5 + 100*0.35 + 70*0.1 + 80*0.05
    assert_eq!(result.match_percentage, 96);
}

#[test]
fn test_determinism() {
    let engine = AnalysisEngine::new(AnalysisOptions::default()).unwrap();

    for (resume, jd) in PAIRS {
        let first = engine.analyze(resume, jd).unwrap();
        let second = engine.analyze(resume, jd).unwrap();
        let fresh = analyze(resume, jd, None).unwrap();

        assert_eq!(first, second);
        assert_eq!(first, fresh);
    }
}

#[test]
fn test_score_bounds() {
    for weights in [ScoringWeights::ats_biased(), ScoringWeights::balanced()] {
        let options = AnalysisOptions {
            weights: Some(weights),
            ..AnalysisOptions::default()
        };
        let engine = AnalysisEngine::new(options).unwrap();

        for (resume, jd) in PAIRS {
            let result = engine.analyze(resume, jd).unwrap();
            assert!(result.match_percentage <= 100);
            assert!(result.scores.keyword_match <= 100);
            assert!(result.scores.skills_match <= 100);
        }
    }
}

#[test]
fn test_disjoint_lists() {
    for (resume, jd) in PAIRS {
        let result = analyze(resume, jd, None).unwrap();

        let matched: HashSet<String> = result.matched_keywords.iter().map(|k| k.to_lowercase()).collect();
        assert!(result
            .missing_keywords
            .iter()
            .all(|k| !matched.contains(&k.to_lowercase())));

        let matched_skills: HashSet<&String> = result.matched_skills.iter().collect();
        assert!(result.missing_skills.iter().all(|s| !matched_skills.contains(s)));
    }
}

#[test]
fn test_keyword_coverage() {
    let engine = AnalysisEngine::new(AnalysisOptions::default()).unwrap();

    for (resume, jd) in PAIRS {
        let composed = engine.compose(resume, jd).unwrap();

        let mut union: Vec<String> = composed
            .matched_keywords
            .iter()
            .chain(composed.missing_keywords.iter())
            .cloned()
            .collect();
        let mut expected = composed.jd_keywords.as_slice().to_vec();
        union.sort();
        expected.sort();

        assert_eq!(union, expected);
    }
}

#[test]
fn test_monotonic_when_missing_keywords_added() {
    let resume = "Backend developer. Built Python services.";
    let jd = "Backend engineer: Kafka pipelines, Kafka streams. Kubernetes clusters and Kubernetes \
              operators. Python python. Terraform modules, terraform state.";

    let before = analyze(resume, jd, None).unwrap();
    assert!(!before.missing_keywords.is_empty());

    let improved = format!("{} {}", resume, before.missing_keywords.join(" "));
    let after = analyze(&improved, jd, None).unwrap();

    assert!(after.match_percentage >= before.match_percentage);
    assert!(after.missing_keywords.is_empty());
}

#[test]
fn test_listed_keywords_capped_at_twenty() {
    let engine = AnalysisEngine::new(AnalysisOptions::default()).unwrap();

    let composed = engine.compose(WIDE_RESUME, WIDE_JD).unwrap();
    assert_eq!(composed.jd_keywords.len(), 25);
    assert_eq!(composed.matched_keywords.len(), 22);

    let result = engine.analyze(WIDE_RESUME, WIDE_JD).unwrap();

    assert_eq!(result.matched_keywords.len(), 20);
    assert_eq!(result.matched_keywords.first().map(String::as_str), Some("ansible"));
    assert_eq!(result.matched_keywords.last().map(String::as_str), Some("tableau"));
    assert_eq!(result.missing_keywords, vec!["webpack", "xcode", "yarn"]);
    // Scored on the complete lists, not the capped ones
    assert_eq!(result.scores.keyword_match, 88);
}

#[test]
fn test_extracted_keyword_mode_is_stricter() {
    let resume = "Worked with Kafka once. Python, Python, Python.";
    let jd = "Kafka and Python. Kafka, Python.";

    let options = AnalysisOptions {
        keyword_match_mode: KeywordMatchMode::ExtractedKeywords,
        ..AnalysisOptions::default()
    };
    let strict = analyze(resume, jd, Some(options)).unwrap();
    let lenient = analyze(resume, jd, None).unwrap();

    assert_eq!(lenient.matched_keywords, vec!["kafka", "python"]);
    assert_eq!(strict.matched_keywords, vec!["python"]);
    assert_eq!(strict.missing_keywords, vec!["kafka"]);
}

#[test]
fn test_custom_vocabulary() {
    let options = AnalysisOptions {
        vocabulary: Some(SkillVocabulary::from_terms(vec!["COBOL".to_string(), "mainframe".to_string()]).unwrap()),
        ..AnalysisOptions::default()
    };

    let result = analyze("COBOL programmer", "Mainframe team needs COBOL", Some(options)).unwrap();

    assert_eq!(result.matched_skills, vec!["cobol"]);
    assert_eq!(result.missing_skills, vec!["mainframe"]);
}

#[tokio::test]
async fn test_text_extraction_from_txt() {
    let mut manager = InputManager::new();

    let text = manager.extract_text(&fixture("sample_resume.txt")).await.unwrap();

    assert!(text.contains("John Doe"));
    assert!(text.contains("Software Engineer"));
    assert!(text.contains("React"));
    assert!(text.contains("Node.js"));
}

#[tokio::test]
async fn test_text_extraction_from_markdown() {
    let mut manager = InputManager::new();

    let text = manager.extract_text(&fixture("sample_resume.md")).await.unwrap();

    assert!(text.contains("John Doe"));
    assert!(text.contains("React"));
    assert!(text.contains("Docker on AWS"));
    assert!(!text.contains("**"));
    assert!(!text.contains("##"));
}

#[tokio::test]
async fn test_markdown_emphasis_does_not_leak_into_keywords() {
    let mut manager = InputManager::new();
    let job = manager.extract_text(&fixture("emphasis_job.md")).await.unwrap();

    assert!(!job.contains('_'));

    let result = analyze("Ran Kubernetes clusters with Terraform", &job, None).unwrap();

    assert_eq!(result.matched_keywords, vec!["kubernetes", "terraform"]);
    assert!(result.missing_keywords.is_empty());
    assert_eq!(result.scores.keyword_match, 100);
}

#[tokio::test]
async fn test_caching_functionality() {
    let mut manager = InputManager::new();
    let path = fixture("sample_resume.txt");

    let first = manager.extract_text(&path).await.unwrap();
    let second = manager.extract_text(&path).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(manager.cache_size(), 1);
}

#[tokio::test]
async fn test_unsupported_and_missing_files() {
    let mut manager = InputManager::new();

    let err = manager.extract_text(&fixture("unsupported.xyz")).await.unwrap_err();
    assert!(matches!(err, ResumeMatchError::UnsupportedFormat(_)));

    let err = manager.extract_text(&fixture("nonexistent.txt")).await.unwrap_err();
    assert!(matches!(err, ResumeMatchError::InvalidInput(_)));
}

#[tokio::test]
async fn test_end_to_end_report() {
    let mut manager = InputManager::new();
    let resume = manager.extract_text(&fixture("sample_resume.txt")).await.unwrap();
    let job = manager.extract_text(&fixture("sample_job.txt")).await.unwrap();

    let engine = AnalysisEngine::new(AnalysisOptions::default()).unwrap();
    let outcome = engine
        .analyze_with_suggestions(&resume, &job, None, Duration::from_secs(1))
        .await
        .unwrap();

    assert!(outcome.result.matched_keywords.contains(&"python".to_string()));
    assert!(outcome.result.missing_keywords.contains(&"kubernetes".to_string()));
    assert!(outcome.result.matched_skills.contains(&"docker".to_string()));
    assert!(outcome.result.missing_skills.contains(&"kafka".to_string()));
    assert!(outcome.result.signals.has_education_markers);

    let metadata = ReportMetadata::new("sample_resume.txt", "sample_job.txt", *engine.weights(), 1);
    let report = MatchReport::from_suggested(outcome, metadata);
    let generator = ReportGenerator::with_options(false, true, true, true, true);

    let json = generator.generate_report(&report, &OutputFormat::Json).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["matchPercentage"], report.result.match_percentage);
    assert!(value["insights"].as_str().unwrap().starts_with("ATS Score:"));

    let html = generator.generate_report(&report, &OutputFormat::Html).unwrap();
    assert!(html.contains("kubernetes"));
}
