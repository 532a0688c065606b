use serde::Serialize;
use sqlx::postgres::PgRow;
use sqlx::query_builder::Separated;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

/// One persisted record type, mapped to a single table.
pub trait Entity: for<'r> FromRow<'r, PgRow> + Send + Unpin + Serialize {
    const TABLE: &'static str;
    /// Natural ordering for list reads, e.g. `"created_at DESC"`.
    const ORDER_BY: &'static str;
}

/// Comma-separated fragment of an INSERT or UPDATE under construction.
/// Values are bound as parameters; only static column text is pushed.
pub type FieldList<'qb> = Separated<'qb, 'static, Postgres, &'static str>;

/// Typed insert payload: the column list plus the bound values, in the same
/// order. The row id is not part of this; callers pass a pre-generated id to
/// `Repository::create`.
pub trait InsertRow {
    fn columns() -> &'static [&'static str];
    fn push_values(&self, row: &mut FieldList<'_>);
}

/// Typed sparse update: pushes `column = $n` pairs for the fields that are
/// present and nothing else. The entity id is never part of the write-set,
/// so a client cannot reassign identity through an update body.
pub trait SparseUpdate {
    fn push_fields(&self, set: &mut FieldList<'_>);
}

/// Generic table gateway. Every operation is one parameterized statement;
/// no caching, no transactions. Column names given to `find_*_by` are
/// static identifiers originating in code, never client input.
pub struct Repository<T> {
    pool: PgPool,
    _phantom: std::marker::PhantomData<T>,
}

impl<T: Entity> Repository<T> {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _phantom: std::marker::PhantomData,
        }
    }

    pub async fn find_all(&self) -> Result<Vec<T>, sqlx::Error> {
        let sql = format!("SELECT * FROM {} ORDER BY {}", T::TABLE, T::ORDER_BY);
        sqlx::query_as::<_, T>(&sql).fetch_all(&self.pool).await
    }

    /// Absent is not an error.
    pub async fn find_by_id(&self, id: &str) -> Result<Option<T>, sqlx::Error> {
        let sql = format!("SELECT * FROM {} WHERE id = $1", T::TABLE);
        sqlx::query_as::<_, T>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn find_one_by(
        &self,
        column: &'static str,
        value: &str,
    ) -> Result<Option<T>, sqlx::Error> {
        let sql = format!("SELECT * FROM {} WHERE {} = $1", T::TABLE, column);
        sqlx::query_as::<_, T>(&sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn find_many_by(
        &self,
        column: &'static str,
        value: &str,
    ) -> Result<Vec<T>, sqlx::Error> {
        let sql = format!(
            "SELECT * FROM {} WHERE {} = $1 ORDER BY {}",
            T::TABLE,
            column,
            T::ORDER_BY
        );
        sqlx::query_as::<_, T>(&sql)
            .bind(value)
            .fetch_all(&self.pool)
            .await
    }

    /// Insert a row under the caller-supplied id and return the stored
    /// record, echoing server-assigned timestamps.
    pub async fn create<N: InsertRow>(&self, id: &str, row: &N) -> Result<T, sqlx::Error> {
        let mut qb = Self::insert_query(id, row);
        qb.build_query_as::<T>().fetch_one(&self.pool).await
    }

    /// Write only the supplied fields, refresh `updated_at`, and return the
    /// updated record; `None` if no row matched. An empty field set still
    /// refreshes the timestamp.
    pub async fn update<U: SparseUpdate>(
        &self,
        id: &str,
        fields: &U,
    ) -> Result<Option<T>, sqlx::Error> {
        let mut qb = Self::update_query(id, fields);
        qb.build_query_as::<T>().fetch_optional(&self.pool).await
    }

    /// True iff exactly one row was removed. Referential fallout (cascade,
    /// null-out) is the store's job, declared in the migrations.
    pub async fn delete(&self, id: &str) -> Result<bool, sqlx::Error> {
        let sql = format!("DELETE FROM {} WHERE id = $1", T::TABLE);
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected() == 1)
    }

    fn insert_query<N: InsertRow>(id: &str, row: &N) -> QueryBuilder<'static, Postgres> {
        let mut qb = QueryBuilder::new(format!(
            "INSERT INTO {} (id, {}) VALUES (",
            T::TABLE,
            N::columns().join(", ")
        ));
        {
            let mut values = qb.separated(", ");
            values.push_bind(id.to_owned());
            row.push_values(&mut values);
        }
        qb.push(") RETURNING *");
        qb
    }

    fn update_query<U: SparseUpdate>(id: &str, fields: &U) -> QueryBuilder<'static, Postgres> {
        let mut qb = QueryBuilder::new(format!("UPDATE {} SET ", T::TABLE));
        {
            let mut set = qb.separated(", ");
            fields.push_fields(&mut set);
            set.push("updated_at = NOW()");
        }
        qb.push(" WHERE id = ");
        qb.push_bind(id.to_owned());
        qb.push(" RETURNING *");
        qb
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::task::{Task, TaskStatus, UpdateTask};

    fn sparse(status: Option<TaskStatus>, title: Option<String>) -> UpdateTask {
        UpdateTask {
            title,
            status,
            ..Default::default()
        }
    }

    #[test]
    fn update_writes_only_supplied_fields() {
        let fields = sparse(Some(TaskStatus::Done), None);
        let sql = Repository::<Task>::update_query("t-1", &fields).into_sql();
        assert_eq!(
            sql,
            "UPDATE tasks SET status = $1, updated_at = NOW() WHERE id = $2 RETURNING *"
        );
    }

    #[test]
    fn empty_update_still_refreshes_the_timestamp() {
        let fields = UpdateTask::default();
        let sql = Repository::<Task>::update_query("t-1", &fields).into_sql();
        assert_eq!(
            sql,
            "UPDATE tasks SET updated_at = NOW() WHERE id = $1 RETURNING *"
        );
    }

    #[test]
    fn update_never_writes_the_id_column() {
        // An `id` key in the body is tolerated but excluded from the
        // write-set; identity always comes from the path.
        let mut fields = sparse(None, Some("retitled".to_string()));
        fields.id = Some("other-id".to_string());
        let sql = Repository::<Task>::update_query("t-1", &fields).into_sql();
        assert_eq!(
            sql,
            "UPDATE tasks SET title = $1, updated_at = NOW() WHERE id = $2 RETURNING *"
        );
    }

    #[test]
    fn insert_binds_the_pregenerated_id_first() {
        let task = crate::models::task::CreateTask {
            title: "Pour foundation".to_string(),
            project_id: "p-1".to_string(),
            status: None,
            priority: None,
            assignee_id: None,
            assignee_name: None,
            assignee_type: None,
            due_date: None,
            description: None,
        };
        let sql = Repository::<Task>::insert_query("t-1", &task).into_sql();
        assert!(sql.starts_with("INSERT INTO tasks (id, title, project_id,"));
        assert!(sql.ends_with(") RETURNING *"));
    }
}
