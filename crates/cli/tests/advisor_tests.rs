//! The comments policy advisor.

use std::collections::HashMap;

use similar_asserts::assert_eq;

use supabase_admin_cli::advisor::{self, Advice};
use supabase_admin_configuration::environment::{EmptyEnvironment, Variable};
use supabase_admin_configuration::project_settings::DEFAULT_PROJECT_URL_VARIABLE;
use supabase_admin_configuration::ProjectSettings;
use tests_common::environment::{project_environment, PROJECT_URL, SERVICE_ROLE_KEY};

fn advise(environment: &HashMap<Variable, String>) -> (bool, String) {
    let mut out = vec![];
    let succeeded = advisor::run(&ProjectSettings::default(), environment, &mut out)
        .expect("advisor::run");
    (succeeded, String::from_utf8(out).expect("utf-8 output"))
}

#[test]
fn reports_all_missing_settings() {
    let mut out = vec![];

    let succeeded =
        advisor::run(&ProjectSettings::default(), &EmptyEnvironment, &mut out).unwrap();

    assert!(!succeeded);
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "❌ Error: Missing NEXT_PUBLIC_SUPABASE_URL and SUPABASE_SERVICE_ROLE_KEY\n\
         Set them in .env.local\n"
    );
}

#[test]
fn empty_values_count_as_missing() {
    let (succeeded, output) = advise(&project_environment(PROJECT_URL, ""));

    assert!(!succeeded);
    assert!(output.starts_with("❌ Error: Missing SUPABASE_SERVICE_ROLE_KEY\n"));
}

#[test]
fn rejects_a_url_without_a_scheme() {
    let (succeeded, output) = advise(&project_environment("abcd1234.supabase.co", SERVICE_ROLE_KEY));

    assert!(!succeeded);
    assert!(output.starts_with("❌ Error: 'abcd1234.supabase.co' is not a valid URL"));
}

#[test]
fn derives_the_project_id_from_the_url() {
    let environment = project_environment("https://abcd1234.supabase.co", SERVICE_ROLE_KEY);
    let project = ProjectSettings::default().resolve(&environment).unwrap();

    let advice = Advice::for_project(&project);

    assert_eq!(advice.project_id, "abcd1234");
    assert_eq!(
        advice.dashboard_url(),
        "https://app.supabase.com/project/abcd1234/sql"
    );
}

#[test]
fn remediation_instructions() {
    tests_common::init_logging();
    let (succeeded, output) = advise(&project_environment(PROJECT_URL, SERVICE_ROLE_KEY));

    assert!(succeeded);
    insta::assert_snapshot!(output);
}

#[test]
fn only_the_url_is_needed_when_the_key_is_plain() {
    let settings = ProjectSettings {
        service_role_key: "inline-key".into(),
        ..ProjectSettings::default()
    };
    let environment = HashMap::from([(
        Variable::from(DEFAULT_PROJECT_URL_VARIABLE),
        PROJECT_URL.to_string(),
    )]);
    let mut out = vec![];

    assert!(advisor::run(&settings, &environment, &mut out).unwrap());
}
