// region:    --- Imports
use super::{run_rules, Rule, ValidationReport};
use crate::domain::{Category, Product, Role, User, UserScore, UserSuspension};
use chrono::{DateTime, Utc};
// endregion: --- Imports

fn char_len(text: &str) -> usize {
    text.chars().count()
}

// region:    --- User Rules

fn user_rules() -> Vec<Rule<User>> {
    vec![
        Rule::new("Name", "name is required", |user: &User| {
            !user.name.is_empty()
        }),
        Rule::new("Name", "name must be between 2 and 50 characters", |user: &User| {
            (2..=50).contains(&char_len(&user.name))
        })
        .when(|user: &User| !user.name.is_empty()),
        Rule::new("Role", "at least one role is required", |user: &User| {
            !user.roles.is_empty()
        }),
    ]
}

/// 사용자 기본 규칙 검증
pub fn validate_user(user: &User) -> ValidationReport {
    run_rules(user, &user_rules())
}

// endregion: --- User Rules

// region:    --- Category Rules

fn category_rules() -> Vec<Rule<Category>> {
    vec![
        Rule::new("Name", "name is required", |category: &Category| {
            !category.name.is_empty()
        }),
        Rule::new("Name", "name must be between 2 and 30 characters", |category: &Category| {
            (2..=30).contains(&char_len(&category.name))
        })
        .when(|category: &Category| !category.name.is_empty()),
    ]
}

/// 카테고리 기본 규칙 검증
pub fn validate_category(category: &Category) -> ValidationReport {
    run_rules(category, &category_rules())
}

// endregion: --- Category Rules

// region:    --- Product Rules

fn product_rules() -> Vec<Rule<Product>> {
    vec![
        Rule::new("Name", "name is required", |product: &Product| {
            !product.name.is_empty()
        }),
        Rule::new("Name", "name must be between 2 and 100 characters", |product: &Product| {
            (2..=100).contains(&char_len(&product.name))
        })
        .when(|product: &Product| !product.name.is_empty()),
        Rule::new("Description", "description is required", |product: &Product| {
            !product.description.is_empty()
        }),
        Rule::new(
            "Description",
            "description must be between 3 and 500 characters",
            |product: &Product| (3..=500).contains(&char_len(&product.description)),
        )
        .when(|product: &Product| !product.description.is_empty()),
        Rule::new("Category", "category is required", |product: &Product| {
            product.category.is_some()
        }),
        Rule::new("Offerer", "offerer is required", |product: &Product| {
            product.offerer.is_some()
        }),
        Rule::new(
            "Offerer.Role",
            "offerer must have the offerer role",
            |product: &Product| {
                product
                    .offerer
                    .as_ref()
                    .map(|offerer| offerer.roles.has(Role::Offerer))
                    .unwrap_or(false)
            },
        )
        .when(|product: &Product| product.offerer.is_some()),
    ]
}

/// 상품 규칙 검증(내장된 판매자/카테고리의 자체 규칙 포함)
pub fn validate_product(product: &Product) -> ValidationReport {
    let mut report = run_rules(product, &product_rules());
    if let Some(offerer) = &product.offerer {
        report.merge_nested("Offerer", validate_user(offerer));
    }
    if let Some(category) = &product.category {
        report.merge_nested("Category", validate_category(category));
    }
    report
}

// endregion: --- Product Rules

// region:    --- Score Rules

fn score_rules() -> Vec<Rule<UserScore>> {
    vec![
        Rule::new("ScoringUser", "scoring user is required", |score: &UserScore| {
            score.scoring_user.is_some()
        }),
        Rule::new("ScoredUser", "scored user is required", |score: &UserScore| {
            score.scored_user.is_some()
        }),
        Rule::new("Score", "score must be between 1 and 10", |score: &UserScore| {
            (1..=10).contains(&score.score)
        }),
    ]
}

/// 평가 점수 규칙 검증
pub fn validate_score(score: &UserScore) -> ValidationReport {
    let mut report = run_rules(score, &score_rules());
    if let Some(scoring_user) = &score.scoring_user {
        report.merge_nested("ScoringUser", validate_user(scoring_user));
    }
    if let Some(scored_user) = &score.scored_user {
        report.merge_nested("ScoredUser", validate_user(scored_user));
    }
    report
}

// endregion: --- Score Rules

// region:    --- Suspension Rules

fn suspension_rules() -> Vec<Rule<UserSuspension>> {
    vec![
        Rule::new("User", "user is required", |suspension: &UserSuspension| {
            suspension.user.is_some()
        }),
        Rule::new(
            "EndDate",
            "end date must be after the start date",
            |suspension: &UserSuspension| suspension.end_date > suspension.start_date,
        ),
    ]
}

/// 정지 기본 규칙 검증
pub fn validate_suspension(suspension: &UserSuspension) -> ValidationReport {
    let mut report = run_rules(suspension, &suspension_rules());
    if let Some(user) = &suspension.user {
        report.merge_nested("User", validate_user(user));
    }
    report
}

/// 외부에서 직접 등록하는 정지에만 추가로 적용(시작일이 미래여야 함)
/// 평판 엔진이 만드는 정지는 즉시 시작하므로 이 규칙을 거치지 않는다
pub fn suspension_add_rules(now: DateTime<Utc>) -> Vec<Rule<UserSuspension>> {
    vec![Rule::new(
        "StartDate",
        "start date must be in the future",
        move |suspension: &UserSuspension| suspension.start_date > now,
    )]
}

// endregion: --- Suspension Rules

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Roles;
    use chrono::Duration;

    fn bidder(name: &str) -> User {
        User::new(name, Roles::bidder_only())
    }

    fn offerer(name: &str) -> User {
        User::new(name, Roles::offerer_only())
    }

    #[test]
    fn valid_user_passes() {
        assert!(validate_user(&bidder("김입찰")).is_valid());
    }

    #[test]
    fn empty_name_reports_only_required() {
        let report = validate_user(&bidder(""));
        assert_eq!(report.violations.len(), 1);
        assert_eq!(report.violations[0].field, "Name");
        assert_eq!(report.violations[0].message, "name is required");
    }

    #[test]
    fn one_char_name_fails_length() {
        let report = validate_user(&bidder("a"));
        assert_eq!(report.violations.len(), 1);
        assert_eq!(
            report.violations[0].message,
            "name must be between 2 and 50 characters"
        );
    }

    #[test]
    fn user_without_roles_fails() {
        let user = User::new("김입찰", Roles::default());
        let report = validate_user(&user);
        assert_eq!(report.violations.len(), 1);
        assert_eq!(report.violations[0].field, "Role");
    }

    #[test]
    fn category_name_bounds() {
        assert!(validate_category(&Category::new("디지털")).is_valid());
        assert!(!validate_category(&Category::new("a")).is_valid());
        assert!(!validate_category(&Category::new(&"가".repeat(31))).is_valid());
    }

    #[test]
    fn product_requires_offerer_role() {
        let product = Product::new(
            bidder("김입찰"),
            "낡은 카메라",
            "필름 카메라, 작동 확인됨",
            Category::new("카메라"),
        );
        let report = validate_product(&product);
        assert!(report
            .violations
            .iter()
            .any(|violation| violation.field == "Offerer.Role"
                && violation.message == "offerer must have the offerer role"));
    }

    #[test]
    fn product_nests_offerer_violations() {
        let product = Product::new(
            offerer(""),
            "낡은 카메라",
            "필름 카메라, 작동 확인됨",
            Category::new("카메라"),
        );
        let report = validate_product(&product);
        assert!(report
            .violations
            .iter()
            .any(|violation| violation.field == "Offerer.Name"));
    }

    #[test]
    fn product_missing_category_fails() {
        let mut product = Product::new(
            offerer("박판매"),
            "낡은 카메라",
            "필름 카메라, 작동 확인됨",
            Category::new("카메라"),
        );
        product.category = None;
        let report = validate_product(&product);
        assert!(report
            .violations
            .iter()
            .any(|violation| violation.field == "Category"));
    }

    #[test]
    fn score_out_of_range_fails() {
        let mut score = UserScore::new(bidder("김입찰"), offerer("박판매"), 11);
        assert!(!validate_score(&score).is_valid());
        score.score = 0;
        assert!(!validate_score(&score).is_valid());
        score.score = 10;
        assert!(validate_score(&score).is_valid());
        score.score = 1;
        assert!(validate_score(&score).is_valid());
    }

    #[test]
    fn suspension_end_must_follow_start() {
        let now = Utc::now();
        let suspension = UserSuspension::new(bidder("김입찰"), now, now - Duration::days(1));
        let report = validate_suspension(&suspension);
        assert!(report
            .violations
            .iter()
            .any(|violation| violation.field == "EndDate"));
    }

    #[test]
    fn add_rule_rejects_past_start() {
        let now = Utc::now();
        let suspension = UserSuspension::new(
            bidder("김입찰"),
            now - Duration::hours(1),
            now + Duration::days(7),
        );
        let report = run_rules(&suspension, &suspension_add_rules(now));
        assert_eq!(report.violations.len(), 1);
        assert_eq!(report.violations[0].field, "StartDate");
        assert_eq!(report.violations[0].message, "start date must be in the future");
    }
}
