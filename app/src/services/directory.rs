use sea_orm::{
    sea_query::{Expr, Func, LikeExpr},
    ColumnTrait, Condition, ConnectionTrait, DatabaseConnection, DbBackend, EntityTrait, Order,
    PaginatorTrait, QueryFilter,
    QueryOrder,
};
use serde::{Deserialize, Serialize};

use crate::{
    models::{
        desk::{self, Entity as DeskEntity, Model as Desk},
        employee::{self, Entity as EmployeeEntity, Model as Employee},
    },
    repos::{desks::DesksRepo, employees::EmployeesRepo},
    services::error::{ServiceError, ServiceResult},
};

/// List parameters as sent by the directory pages.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    pub search: Option<String>,
    pub current_filter: Option<String>,
    pub sort: Option<String>,
    pub page: Option<u64>,
}

impl ListQuery {
    /// The filter in effect and the page to show. A changed search string
    /// starts over at page 1.
    fn resolve(&self) -> (String, u64) {
        let previous = self.current_filter.as_deref().unwrap_or_default().trim();
        match self.search.as_deref().map(str::trim) {
            Some(search) if search != previous => (search.to_string(), 1),
            Some(search) => (search.to_string(), self.page.unwrap_or(1)),
            None => (previous.to_string(), self.page.unwrap_or(1)),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u64,
    pub page_size: u64,
    pub total_items: u64,
    pub total_pages: u64,
    pub sort: String,
    pub current_filter: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeskSort {
    Id,
    Occupant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmployeeSort {
    Name,
    Email,
    Phone,
    Desk,
    Manager,
    Title,
    Id,
}

/// A sort column plus direction, parsed from keys like `email` or `email_desc`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey<F> {
    pub field: F,
    pub descending: bool,
}

fn split_direction(raw: &str) -> (&str, bool) {
    match raw.trim().strip_suffix("_desc") {
        Some(field) => (field, true),
        None => (raw.trim(), false),
    }
}

impl SortKey<DeskSort> {
    pub fn parse(raw: Option<&str>) -> Self {
        let (field, descending) = split_direction(raw.unwrap_or_default());
        let field = match field {
            "id" | "desk" | "desk_id" => Some(DeskSort::Id),
            "occupant" => Some(DeskSort::Occupant),
            _ => None,
        };

        match field {
            Some(field) => Self { field, descending },
            None => Self {
                field: DeskSort::Id,
                descending: false,
            },
        }
    }

    pub fn as_key(&self) -> String {
        let field = match self.field {
            DeskSort::Id => "id",
            DeskSort::Occupant => "occupant",
        };
        with_direction(field, self.descending)
    }

    fn column(&self) -> desk::Column {
        match self.field {
            DeskSort::Id => desk::Column::DeskId,
            DeskSort::Occupant => desk::Column::Occupant,
        }
    }
}

impl SortKey<EmployeeSort> {
    pub fn parse(raw: Option<&str>) -> Self {
        let (field, descending) = split_direction(raw.unwrap_or_default());
        let field = match field {
            "name" => Some(EmployeeSort::Name),
            "email" => Some(EmployeeSort::Email),
            "phone" => Some(EmployeeSort::Phone),
            "desk" => Some(EmployeeSort::Desk),
            "mngr" | "manager" => Some(EmployeeSort::Manager),
            "title" => Some(EmployeeSort::Title),
            "id" => Some(EmployeeSort::Id),
            _ => None,
        };

        match field {
            Some(field) => Self { field, descending },
            None => Self {
                field: EmployeeSort::Name,
                descending: false,
            },
        }
    }

    pub fn as_key(&self) -> String {
        let field = match self.field {
            EmployeeSort::Name => "name",
            EmployeeSort::Email => "email",
            EmployeeSort::Phone => "phone",
            EmployeeSort::Desk => "desk",
            EmployeeSort::Manager => "mngr",
            EmployeeSort::Title => "title",
            EmployeeSort::Id => "id",
        };
        with_direction(field, self.descending)
    }

    fn column(&self) -> employee::Column {
        match self.field {
            EmployeeSort::Name => employee::Column::Name,
            EmployeeSort::Email => employee::Column::Email,
            EmployeeSort::Phone => employee::Column::Phone,
            EmployeeSort::Desk => employee::Column::Desk,
            EmployeeSort::Manager => employee::Column::Manager,
            EmployeeSort::Title => employee::Column::Title,
            EmployeeSort::Id => employee::Column::Id,
        }
    }
}

impl<F> SortKey<F> {
    fn order(&self) -> Order {
        if self.descending {
            Order::Desc
        } else {
            Order::Asc
        }
    }
}

fn with_direction(field: &str, descending: bool) -> String {
    if descending {
        format!("{}_desc", field)
    } else {
        field.to_string()
    }
}

/// Keeps a requested page inside `1..=total_pages`. An empty result still has
/// one (empty) page.
pub fn clamp_page(requested: u64, total_pages: u64) -> u64 {
    Ord::clamp(requested, 1, Ord::max(total_pages, 1))
}

/// `%`/`_`/`\` in user input match literally. The search string is folded
/// the way the backend's `LOWER()` folds the column: SQLite only maps ASCII
/// letters, Postgres maps the full Unicode range.
fn like_pattern(search: &str, backend: DbBackend) -> String {
    let folded = match backend {
        DbBackend::Sqlite => search.to_ascii_lowercase(),
        _ => search.to_lowercase(),
    };

    let mut pattern = String::with_capacity(folded.len() + 2);
    pattern.push('%');
    for c in folded.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Case-insensitive "any column contains the search string".
fn search_condition<C: ColumnTrait>(
    columns: &[C],
    search: &str,
    backend: DbBackend,
) -> Condition {
    use sea_orm::sea_query::ExprTrait;

    let pattern = like_pattern(search, backend);
    columns.iter().fold(Condition::any(), |condition, column| {
        condition.add(
            Expr::expr(Func::lower(Expr::col(*column)))
                .like(LikeExpr::new(pattern.clone()).escape('\\')),
        )
    })
}

const DESK_SEARCH_COLUMNS: [desk::Column; 2] = [desk::Column::DeskId, desk::Column::Occupant];

const EMPLOYEE_SEARCH_COLUMNS: [employee::Column; 7] = [
    employee::Column::Name,
    employee::Column::Email,
    employee::Column::Phone,
    employee::Column::Desk,
    employee::Column::Manager,
    employee::Column::Id,
    employee::Column::Title,
];

/// Read-only listing over desks and employees.
#[derive(Clone)]
pub struct DirectoryService {
    db: DatabaseConnection,
    desk_page_size: u64,
    employee_page_size: u64,
}

impl DirectoryService {
    pub fn new(db: DatabaseConnection, desk_page_size: u64, employee_page_size: u64) -> Self {
        Self {
            db,
            desk_page_size: Ord::max(desk_page_size, 1),
            employee_page_size: Ord::max(employee_page_size, 1),
        }
    }

    pub async fn list_desks(&self, query: &ListQuery) -> ServiceResult<Page<Desk>> {
        let (filter, requested_page) = query.resolve();
        let sort = SortKey::<DeskSort>::parse(query.sort.as_deref());

        let mut select = DeskEntity::find();
        if !filter.is_empty() {
            select = select.filter(search_condition(
                &DESK_SEARCH_COLUMNS,
                &filter,
                self.db.get_database_backend(),
            ));
        }
        let select = select
            .order_by(sort.column(), sort.order())
            .order_by(desk::Column::DeskId, Order::Asc);

        let paginator = select.paginate(&self.db, self.desk_page_size);
        let totals = paginator.num_items_and_pages().await?;
        let page = clamp_page(requested_page, totals.number_of_pages);
        let items = paginator.fetch_page(page - 1).await?;

        Ok(Page {
            items,
            page,
            page_size: self.desk_page_size,
            total_items: totals.number_of_items,
            total_pages: Ord::max(totals.number_of_pages, 1),
            sort: sort.as_key(),
            current_filter: filter,
        })
    }

    pub async fn list_employees(&self, query: &ListQuery) -> ServiceResult<Page<Employee>> {
        let (filter, requested_page) = query.resolve();
        let sort = SortKey::<EmployeeSort>::parse(query.sort.as_deref());

        let mut select = EmployeeEntity::find();
        if !filter.is_empty() {
            select = select.filter(search_condition(
                &EMPLOYEE_SEARCH_COLUMNS,
                &filter,
                self.db.get_database_backend(),
            ));
        }
        let select = select
            .order_by(sort.column(), sort.order())
            .order_by(employee::Column::Id, Order::Asc);

        let paginator = select.paginate(&self.db, self.employee_page_size);
        let totals = paginator.num_items_and_pages().await?;
        let page = clamp_page(requested_page, totals.number_of_pages);
        let items = paginator.fetch_page(page - 1).await?;

        Ok(Page {
            items,
            page,
            page_size: self.employee_page_size,
            total_items: totals.number_of_items,
            total_pages: Ord::max(totals.number_of_pages, 1),
            sort: sort.as_key(),
            current_filter: filter,
        })
    }

    pub async fn get_desk(&self, desk_id: &str) -> ServiceResult<Desk> {
        DesksRepo::new(&self.db)
            .find(desk_id.trim())
            .await?
            .ok_or_else(|| ServiceError::NotFound("Desk not found".to_string()))
    }

    pub async fn get_employee(&self, id: &str) -> ServiceResult<Employee> {
        EmployeesRepo::new(&self.db)
            .find(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Employee not found".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        database::connect::connect_test_database,
        services::assignment::{AssignmentService, EmployeeForm},
    };

    fn person(name: &str, title: &str, email: &str, phone: &str, manager: &str) -> EmployeeForm {
        EmployeeForm {
            name: name.to_string(),
            title: title.to_string(),
            desk: None,
            email: email.to_string(),
            phone: phone.to_string(),
            manager: manager.to_string(),
        }
    }

    /// Six people match "alice" through a different column each; Gus only by desk.
    async fn seeded(page_size: u64) -> DirectoryService {
        let db = connect_test_database().await;
        let assignments = AssignmentService::new(db.clone());
        for desk in ["D4001", "D4002", "D5001"] {
            assignments.create_desk(desk).await.unwrap();
        }

        let people = [
            ("e1", person("Alice Ng", "Engineer", "ang@example.com", "555-0101", "Carol")),
            ("e2", person("Bob", "Engineer", "ALICE.team@example.com", "555-0102", "Carol")),
            ("e3", person("Carl", "Designer", "carl@example.com", "alice-line", "Carol")),
            ("e4", person("Dana", "Designer", "dana@example.com", "555-0104", "Alice")),
            ("e5", person("Eve", "Alice's assistant", "eve@example.com", "555-0105", "Carol")),
            ("alice-6", person("Finn", "Manager", "finn@example.com", "555-0106", "Carol")),
        ];
        for (id, form) in people {
            assignments.create_employee(id, form).await.unwrap();
        }
        let mut gus = person("Gus", "Intern", "gus@example.com", "555-0107", "Dana");
        gus.desk = Some("D4001".to_string());
        assignments.create_employee("e7", gus).await.unwrap();

        DirectoryService::new(db, page_size, page_size)
    }

    fn search(term: &str) -> ListQuery {
        ListQuery {
            search: Some(term.to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_search_matches_every_column_case_insensitively() {
        let directory = seeded(25).await;

        let page = directory.list_employees(&search("aLiCe")).await.unwrap();
        let mut ids: Vec<_> = page.items.iter().map(|e| e.id.as_str()).collect();
        ids.sort();
        assert_eq!(ids, vec!["alice-6", "e1", "e2", "e3", "e4", "e5"]);
        assert_eq!(page.total_items, 6);
        assert_eq!(page.current_filter, "aLiCe");

        let page = directory.list_employees(&search("d4001")).await.unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].id, "e7");
    }

    #[tokio::test]
    async fn test_search_finds_accented_names() {
        let db = connect_test_database().await;
        AssignmentService::new(db.clone())
            .create_employee(
                "e1",
                person("Émile Zola", "Author", "ez@example.com", "555-0199", "Hugo"),
            )
            .await
            .unwrap();
        let directory = DirectoryService::new(db, 25, 25);

        for term in ["Émile", "ÉMILE", "Émile Zola", "ZOLA", "mile"] {
            let page = directory.list_employees(&search(term)).await.unwrap();
            assert_eq!(page.total_items, 1, "search {:?}", term);
            assert_eq!(page.items[0].id, "e1");
        }
    }

    #[tokio::test]
    async fn test_search_treats_wildcards_literally() {
        let directory = seeded(25).await;

        let page = directory.list_employees(&search("%")).await.unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.page, 1);
    }

    #[tokio::test]
    async fn test_out_of_range_page_is_clamped() {
        let directory = seeded(3).await;

        let query = ListQuery {
            page: Some(99),
            ..Default::default()
        };
        let page = directory.list_employees(&query).await.unwrap();
        assert_eq!(page.total_items, 7);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.page, 3);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].name, "Gus");
    }

    #[tokio::test]
    async fn test_sorted_listing() {
        let directory = seeded(25).await;

        let query = ListQuery {
            sort: Some("name_desc".to_string()),
            ..Default::default()
        };
        let page = directory.list_employees(&query).await.unwrap();
        let names: Vec<_> = page.items.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Gus", "Finn", "Eve", "Dana", "Carl", "Bob", "Alice Ng"]);
        assert_eq!(page.sort, "name_desc");

        let page = directory.list_desks(&ListQuery::default()).await.unwrap();
        let desks: Vec<_> = page.items.iter().map(|d| d.desk_id.as_str()).collect();
        assert_eq!(desks, vec!["D4001", "D4002", "D5001"]);

        let page = directory.list_desks(&search("gus")).await.unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].occupant.as_deref(), Some("Gus"));
    }

    #[tokio::test]
    async fn test_get_missing_records() {
        let directory = seeded(25).await;

        assert!(matches!(
            directory.get_desk("D9999").await,
            Err(ServiceError::NotFound(_))
        ));
        assert!(matches!(
            directory.get_employee("nobody").await,
            Err(ServiceError::NotFound(_))
        ));
        assert_eq!(directory.get_employee("e7").await.unwrap().name, "Gus");
    }

    #[test]
    fn test_sort_key_parsing() {
        let sort = SortKey::<EmployeeSort>::parse(Some("email_desc"));
        assert_eq!(sort.field, EmployeeSort::Email);
        assert!(sort.descending);
        assert_eq!(sort.as_key(), "email_desc");

        let sort = SortKey::<EmployeeSort>::parse(Some("manager"));
        assert_eq!(sort.as_key(), "mngr");

        let sort = SortKey::<DeskSort>::parse(Some("occupant_desc"));
        assert_eq!(sort.field, DeskSort::Occupant);
        assert!(sort.descending);
    }

    #[test]
    fn test_unknown_sort_defaults_to_primary_field() {
        for raw in [None, Some(""), Some("salary"), Some("salary_desc")] {
            let sort = SortKey::<EmployeeSort>::parse(raw);
            assert_eq!(sort.field, EmployeeSort::Name);
            assert!(!sort.descending);

            let sort = SortKey::<DeskSort>::parse(raw);
            assert_eq!(sort.field, DeskSort::Id);
            assert!(!sort.descending);
        }
    }

    #[test]
    fn test_clamp_page() {
        assert_eq!(clamp_page(99, 3), 3);
        assert_eq!(clamp_page(0, 3), 1);
        assert_eq!(clamp_page(2, 3), 2);
        assert_eq!(clamp_page(5, 0), 1);
    }

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("Alice", DbBackend::Postgres), "%alice%");
        assert_eq!(
            like_pattern("50%_a\\b", DbBackend::Sqlite),
            "%50\\%\\_a\\\\b%"
        );
    }

    #[test]
    fn test_like_pattern_folds_like_the_backend() {
        assert_eq!(like_pattern("ÉMILE", DbBackend::Postgres), "%émile%");
        assert_eq!(like_pattern("ÉMILE", DbBackend::Sqlite), "%Émile%");
    }

    #[test]
    fn test_new_search_resets_page() {
        let query = ListQuery {
            search: Some("alice".to_string()),
            current_filter: Some("bob".to_string()),
            sort: None,
            page: Some(4),
        };
        assert_eq!(query.resolve(), ("alice".to_string(), 1));

        let query = ListQuery {
            search: Some("alice".to_string()),
            current_filter: Some("alice".to_string()),
            sort: None,
            page: Some(4),
        };
        assert_eq!(query.resolve(), ("alice".to_string(), 4));

        let query = ListQuery {
            search: None,
            current_filter: Some("alice".to_string()),
            sort: None,
            page: Some(2),
        };
        assert_eq!(query.resolve(), ("alice".to_string(), 2));
    }
}
