use employee_core::{
    EmployeeRepository, NewEmployee, RepoError, SqliteConnectionProvider,
    SqliteEmployeeRepository,
};
use tempfile::TempDir;

fn setup() -> (TempDir, SqliteEmployeeRepository<SqliteConnectionProvider>) {
    let dir = tempfile::tempdir().unwrap();
    let provider = SqliteConnectionProvider::new(dir.path().join("employees.sqlite3"));
    let repo = SqliteEmployeeRepository::new(provider);
    repo.initialize_schema().unwrap();
    (dir, repo)
}

fn empty_repo() -> (TempDir, SqliteEmployeeRepository<SqliteConnectionProvider>) {
    let (dir, repo) = setup();
    for employee in repo.list_all().unwrap() {
        repo.delete_by_id(employee.id).unwrap();
    }
    (dir, repo)
}

#[test]
fn initialize_schema_seeds_two_fixed_rows() {
    let (_dir, repo) = setup();

    let all = repo.list_all().unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].id, 1);
    assert_eq!(all[0].name, "John Doe");
    assert_eq!(all[0].email, "john.doe@example.com");
    assert_eq!(all[0].country, "USA");
    assert_eq!(all[1].name, "Jane Smith");
    assert_eq!(all[1].country, "UK");
}

#[test]
fn initialize_schema_discards_existing_rows() {
    let (_dir, repo) = setup();
    repo.insert(&NewEmployee::new("Extra", "extra@example.com", "NZ"))
        .unwrap();

    repo.initialize_schema().unwrap();

    assert_eq!(repo.list_all().unwrap().len(), 2);
}

#[test]
fn insert_and_get_roundtrip() {
    let (_dir, repo) = setup();

    let payload = NewEmployee::new("Ada Lovelace", "ada@example.com", "UK");
    let id = repo.insert(&payload).unwrap();

    let loaded = repo.get_by_id(id).unwrap().unwrap();
    assert_eq!(loaded, payload.with_id(id));
}

#[test]
fn insert_assigns_increasing_ids() {
    let (_dir, repo) = setup();

    let first = repo
        .insert(&NewEmployee::new("A", "a@example.com", "US"))
        .unwrap();
    let second = repo
        .insert(&NewEmployee::new("B", "b@example.com", "US"))
        .unwrap();

    assert!(second > first);
}

#[test]
fn duplicate_email_insert_is_a_conflict_and_keeps_one_row() {
    let (_dir, repo) = setup();

    repo.insert(&NewEmployee::new("First", "dup@example.com", "US"))
        .unwrap();
    let err = repo
        .insert(&NewEmployee::new("Second", "dup@example.com", "CA"))
        .unwrap_err();

    assert!(matches!(err, RepoError::DuplicateEmail { ref email } if email == "dup@example.com"));
    let matching: Vec<_> = repo
        .list_all()
        .unwrap()
        .into_iter()
        .filter(|employee| employee.email == "dup@example.com")
        .collect();
    assert_eq!(matching.len(), 1);
    assert_eq!(matching[0].name, "First");
}

#[test]
fn invalid_payload_is_rejected_before_reaching_the_store() {
    let (_dir, repo) = setup();

    let err = repo
        .insert(&NewEmployee::new("   ", "blank@example.com", "US"))
        .unwrap_err();

    assert!(matches!(err, RepoError::Validation(_)));
    assert_eq!(repo.list_all().unwrap().len(), 2);
}

#[test]
fn list_all_on_empty_table_is_empty_not_error() {
    let (_dir, repo) = empty_repo();

    assert!(repo.list_all().unwrap().is_empty());
}

#[test]
fn get_by_id_missing_returns_none() {
    let (_dir, repo) = setup();

    assert!(repo.get_by_id(9_999).unwrap().is_none());
}

#[test]
fn update_by_id_overwrites_mutable_fields() {
    let (_dir, repo) = setup();

    let changes = NewEmployee::new("John Q. Doe", "jqd@example.com", "Canada");
    let changed = repo.update_by_id(1, &changes).unwrap();

    assert_eq!(changed, 1);
    assert_eq!(repo.get_by_id(1).unwrap().unwrap(), changes.clone().with_id(1));
}

#[test]
fn update_by_id_missing_returns_zero_and_leaves_table_unchanged() {
    let (_dir, repo) = setup();
    let before = repo.list_all().unwrap();

    let changed = repo
        .update_by_id(404, &NewEmployee::new("Ghost", "ghost@example.com", "Nowhere"))
        .unwrap();

    assert_eq!(changed, 0);
    assert_eq!(repo.list_all().unwrap(), before);
}

#[test]
fn update_to_existing_email_is_a_conflict() {
    let (_dir, repo) = setup();

    let err = repo
        .update_by_id(2, &NewEmployee::new("Jane", "john.doe@example.com", "UK"))
        .unwrap_err();

    assert!(matches!(err, RepoError::DuplicateEmail { .. }));
    assert_eq!(repo.get_by_id(2).unwrap().unwrap().email, "jane.smith@example.com");
}

#[test]
fn update_by_name_updates_the_matching_row() {
    let (_dir, repo) = setup();

    let changes = NewEmployee::new("Jane S.", "jane.s@example.com", "France");
    let changed = repo.update_by_name("Jane Smith", &changes).unwrap();

    assert_eq!(changed, 1);
    assert_eq!(repo.get_by_id(2).unwrap().unwrap(), changes.clone().with_id(2));
    assert_eq!(repo.update_by_name("Jane Smith", &changes).unwrap(), 0);
}

#[test]
fn update_by_name_applies_to_all_matches_as_one_statement() {
    let (_dir, repo) = setup();
    repo.insert(&NewEmployee::new("John Doe", "john.two@example.com", "IE"))
        .unwrap();
    let before = repo.list_all().unwrap();

    // Every match receives the same email, so two matches trip the unique index.
    let err = repo
        .update_by_name("John Doe", &NewEmployee::new("Johnny", "johnny@example.com", "US"))
        .unwrap_err();

    assert!(matches!(err, RepoError::DuplicateEmail { .. }));
    assert_eq!(repo.list_all().unwrap(), before);
}

#[test]
fn update_by_email_targets_one_row() {
    let (_dir, repo) = setup();

    let changes = NewEmployee::new("Jane Smith", "jane.new@example.com", "Ireland");
    let changed = repo
        .update_by_email("jane.smith@example.com", &changes)
        .unwrap();

    assert_eq!(changed, 1);
    assert_eq!(repo.get_by_id(2).unwrap().unwrap(), changes.clone().with_id(2));
    assert_eq!(
        repo.update_by_email("jane.smith@example.com", &changes)
            .unwrap(),
        0
    );
}

#[test]
fn delete_by_id_removes_exactly_that_row() {
    let (_dir, repo) = setup();

    let deleted = repo.delete_by_id(1).unwrap();

    assert_eq!(deleted, 1);
    assert!(repo.get_by_id(1).unwrap().is_none());
    let remaining = repo.list_all().unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, 2);
}

#[test]
fn delete_by_id_missing_returns_zero() {
    let (_dir, repo) = setup();

    assert_eq!(repo.delete_by_id(77).unwrap(), 0);
    assert_eq!(repo.list_all().unwrap().len(), 2);
}
