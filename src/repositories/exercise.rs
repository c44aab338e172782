// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Exercise persistence.
//!
//! An exercise row carries the scalar fields. Muscle groups and equipment
//! are many-to-many joins; difficulty, movement and image lists are child
//! tag tables. Every list keeps its order through a `position` column.

use super::equipment::{row_to_equipment, COLUMNS as EQUIPMENT_COLUMNS};
use super::muscle_group::{row_to_muscle_group, COLUMNS as MUSCLE_GROUP_COLUMNS};
use super::{
    contains_pattern, dedup_in_order, ensure_referenced, get_optional_timestamp, get_tag,
    get_timestamp, is_foreign_key_violation, log_operation, new_id, not_found, now,
    storage_error, validate_id, Entity, Operation, Repository, RepositoryError,
};
use crate::db::Database;
use crate::models::exercise::{ExerciseFilter, ExercisePatch, NewExercise};
use crate::models::{Difficulty, Exercise, Movement};
use crate::time_utils::format_storage_timestamp;
use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, Sqlite, SqliteConnection};

const ENTITY: Entity = Entity::Exercise;

const COLUMNS: &str = "e.id, e.name, e.description, e.exercise_type, e.video_url, e.is_archived, \
                       e.last_used_at, e.created_at, e.updated_at";

#[derive(Clone)]
pub struct ExerciseRepository {
    db: Database,
}

/// Scalar columns of an exercise row, before relations are loaded.
fn row_to_exercise(row: &SqliteRow) -> Result<Exercise, sqlx::Error> {
    Ok(Exercise {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        exercise_type: get_tag(row, "exercise_type")?,
        muscle_groups: Vec::new(),
        difficulty: Vec::new(),
        equipment: Vec::new(),
        movements: Vec::new(),
        video_url: row.try_get("video_url")?,
        image_urls: Vec::new(),
        is_archived: row.try_get("is_archived")?,
        last_used_at: get_optional_timestamp(row, "last_used_at")?,
        created_at: get_timestamp(row, "created_at")?,
        updated_at: get_timestamp(row, "updated_at")?,
    })
}

impl ExerciseRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Load the ordered relations of an exercise.
    async fn hydrate(&self, mut exercise: Exercise) -> Result<Exercise, sqlx::Error> {
        let pool = self.db.pool();

        exercise.muscle_groups = sqlx::query(&format!(
            r"
            SELECT {MUSCLE_GROUP_COLUMNS}
            FROM exercise_muscle_groups emg
            JOIN muscle_groups mg ON mg.id = emg.muscle_group_id
            WHERE emg.exercise_id = ?
            ORDER BY emg.position
            "
        ))
        .bind(&exercise.id)
        .fetch_all(pool)
        .await?
        .iter()
        .map(row_to_muscle_group)
        .collect::<Result<_, _>>()?;

        exercise.equipment = sqlx::query(&format!(
            r"
            SELECT {EQUIPMENT_COLUMNS}
            FROM exercise_equipment ee
            JOIN equipment eq ON eq.id = ee.equipment_id
            WHERE ee.exercise_id = ?
            ORDER BY ee.position
            "
        ))
        .bind(&exercise.id)
        .fetch_all(pool)
        .await?
        .iter()
        .map(row_to_equipment)
        .collect::<Result<_, _>>()?;

        exercise.difficulty = sqlx::query(
            "SELECT difficulty FROM exercise_difficulties WHERE exercise_id = ? ORDER BY position",
        )
        .bind(&exercise.id)
        .fetch_all(pool)
        .await?
        .iter()
        .map(|row| get_tag::<Difficulty>(row, "difficulty"))
        .collect::<Result<_, _>>()?;

        exercise.movements = sqlx::query(
            "SELECT movement FROM exercise_movements WHERE exercise_id = ? ORDER BY position",
        )
        .bind(&exercise.id)
        .fetch_all(pool)
        .await?
        .iter()
        .map(|row| get_tag::<Movement>(row, "movement"))
        .collect::<Result<_, _>>()?;

        exercise.image_urls = sqlx::query(
            "SELECT url FROM exercise_images WHERE exercise_id = ? ORDER BY position",
        )
        .bind(&exercise.id)
        .fetch_all(pool)
        .await?
        .iter()
        .map(|row| row.try_get::<String, _>("url"))
        .collect::<Result<_, _>>()?;

        Ok(exercise)
    }
}

/// Replace the muscle group links of an exercise.
async fn write_muscle_groups(
    conn: &mut SqliteConnection,
    exercise_id: &str,
    ids: &[String],
) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM exercise_muscle_groups WHERE exercise_id = ?")
        .bind(exercise_id)
        .execute(&mut *conn)
        .await?;
    for (position, id) in dedup_in_order(ids).iter().enumerate() {
        sqlx::query(
            "INSERT INTO exercise_muscle_groups (exercise_id, muscle_group_id, position) VALUES (?, ?, ?)",
        )
        .bind(exercise_id)
        .bind(id)
        .bind(position as i64)
        .execute(&mut *conn)
        .await?;
    }
    Ok(())
}

async fn write_equipment(
    conn: &mut SqliteConnection,
    exercise_id: &str,
    ids: &[String],
) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM exercise_equipment WHERE exercise_id = ?")
        .bind(exercise_id)
        .execute(&mut *conn)
        .await?;
    for (position, id) in dedup_in_order(ids).iter().enumerate() {
        sqlx::query(
            "INSERT INTO exercise_equipment (exercise_id, equipment_id, position) VALUES (?, ?, ?)",
        )
        .bind(exercise_id)
        .bind(id)
        .bind(position as i64)
        .execute(&mut *conn)
        .await?;
    }
    Ok(())
}

async fn write_difficulties(
    conn: &mut SqliteConnection,
    exercise_id: &str,
    values: &[Difficulty],
) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM exercise_difficulties WHERE exercise_id = ?")
        .bind(exercise_id)
        .execute(&mut *conn)
        .await?;
    for (position, value) in dedup_in_order(values).iter().enumerate() {
        sqlx::query(
            "INSERT INTO exercise_difficulties (exercise_id, difficulty, position) VALUES (?, ?, ?)",
        )
        .bind(exercise_id)
        .bind(value.as_str())
        .bind(position as i64)
        .execute(&mut *conn)
        .await?;
    }
    Ok(())
}

async fn write_movements(
    conn: &mut SqliteConnection,
    exercise_id: &str,
    values: &[Movement],
) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM exercise_movements WHERE exercise_id = ?")
        .bind(exercise_id)
        .execute(&mut *conn)
        .await?;
    for (position, value) in dedup_in_order(values).iter().enumerate() {
        sqlx::query(
            "INSERT INTO exercise_movements (exercise_id, movement, position) VALUES (?, ?, ?)",
        )
        .bind(exercise_id)
        .bind(value.as_str())
        .bind(position as i64)
        .execute(&mut *conn)
        .await?;
    }
    Ok(())
}

async fn write_images(
    conn: &mut SqliteConnection,
    exercise_id: &str,
    urls: &[String],
) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM exercise_images WHERE exercise_id = ?")
        .bind(exercise_id)
        .execute(&mut *conn)
        .await?;
    for (position, url) in urls.iter().enumerate() {
        sqlx::query("INSERT INTO exercise_images (exercise_id, url, position) VALUES (?, ?, ?)")
            .bind(exercise_id)
            .bind(url)
            .bind(position as i64)
            .execute(&mut *conn)
            .await?;
    }
    Ok(())
}

#[async_trait]
impl Repository for ExerciseRepository {
    type Entity = Exercise;
    type Filter = ExerciseFilter;
    type Create = NewExercise;
    type Update = ExercisePatch;

    async fn find_by_id(&self, id: &str) -> Result<Exercise, RepositoryError> {
        validate_id(ENTITY, id)?;
        log_operation(ENTITY, Operation::FindById, Some(id));

        let row = sqlx::query(&format!("SELECT {COLUMNS} FROM exercises e WHERE e.id = ?"))
            .bind(id)
            .fetch_optional(self.db.pool())
            .await
            .map_err(storage_error(ENTITY, Operation::FindById))?
            .ok_or_else(|| not_found(ENTITY, id))?;

        let exercise = row_to_exercise(&row).map_err(storage_error(ENTITY, Operation::FindById))?;
        self.hydrate(exercise)
            .await
            .map_err(storage_error(ENTITY, Operation::FindById))
    }

    async fn find_all(&self, filter: &ExerciseFilter) -> Result<Vec<Exercise>, RepositoryError> {
        log_operation(ENTITY, Operation::FindAll, None);

        let mut query: QueryBuilder<Sqlite> =
            QueryBuilder::new(format!("SELECT {COLUMNS} FROM exercises e WHERE 1 = 1"));

        if let Some(name) = &filter.name {
            query
                .push(" AND e.name LIKE ")
                .push_bind(contains_pattern(name))
                .push(" ESCAPE '\\'");
        }
        if let Some(exercise_type) = filter.exercise_type {
            query
                .push(" AND e.exercise_type = ")
                .push_bind(exercise_type.as_str());
        }
        if let Some(is_archived) = filter.is_archived {
            query.push(" AND e.is_archived = ").push_bind(is_archived);
        }
        if !filter.muscle_group_ids.is_empty() {
            query.push(
                " AND EXISTS (SELECT 1 FROM exercise_muscle_groups emg \
                 WHERE emg.exercise_id = e.id AND emg.muscle_group_id IN (",
            );
            let mut ids = query.separated(", ");
            for id in &filter.muscle_group_ids {
                ids.push_bind(id.clone());
            }
            query.push("))");
        }
        if let Some(body) = filter.body {
            query
                .push(
                    " AND EXISTS (SELECT 1 FROM exercise_muscle_groups emg \
                     JOIN muscle_groups mg ON mg.id = emg.muscle_group_id \
                     WHERE emg.exercise_id = e.id AND mg.body = ",
                )
                .push_bind(body.as_str())
                .push(")");
        }
        if !filter.difficulty.is_empty() {
            query.push(
                " AND EXISTS (SELECT 1 FROM exercise_difficulties ed \
                 WHERE ed.exercise_id = e.id AND ed.difficulty IN (",
            );
            let mut values = query.separated(", ");
            for difficulty in &filter.difficulty {
                values.push_bind(difficulty.as_str());
            }
            query.push("))");
        }
        if !filter.equipment_ids.is_empty() {
            query.push(
                " AND EXISTS (SELECT 1 FROM exercise_equipment ee \
                 WHERE ee.exercise_id = e.id AND ee.equipment_id IN (",
            );
            let mut ids = query.separated(", ");
            for id in &filter.equipment_ids {
                ids.push_bind(id.clone());
            }
            query.push("))");
        }
        query.push(" ORDER BY e.updated_at DESC, e.rowid DESC");

        let rows = query
            .build()
            .fetch_all(self.db.pool())
            .await
            .map_err(storage_error(ENTITY, Operation::FindAll))?;

        let mut exercises = Vec::with_capacity(rows.len());
        for row in &rows {
            let exercise = row_to_exercise(row).map_err(storage_error(ENTITY, Operation::FindAll))?;
            exercises.push(
                self.hydrate(exercise)
                    .await
                    .map_err(storage_error(ENTITY, Operation::FindAll))?,
            );
        }
        Ok(exercises)
    }

    async fn create(&self, data: NewExercise) -> Result<Exercise, RepositoryError> {
        log_operation(ENTITY, Operation::Create, None);
        let fail = || storage_error(ENTITY, Operation::Create);

        let id = new_id();
        let stamp = format_storage_timestamp(now());

        let mut tx = self.db.pool().begin().await.map_err(fail())?;

        ensure_referenced(
            &mut tx,
            Entity::MuscleGroup,
            &data.muscle_group_ids,
            (ENTITY, Operation::Create),
        )
        .await?;
        ensure_referenced(
            &mut tx,
            Entity::Equipment,
            &data.equipment_ids,
            (ENTITY, Operation::Create),
        )
        .await?;

        sqlx::query(
            r"
            INSERT INTO exercises (id, name, description, exercise_type, video_url, is_archived,
                                   last_used_at, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, NULL, ?, ?)
            ",
        )
        .bind(&id)
        .bind(&data.name)
        .bind(&data.description)
        .bind(data.exercise_type.as_str())
        .bind(&data.video_url)
        .bind(data.is_archived)
        .bind(&stamp)
        .bind(&stamp)
        .execute(&mut *tx)
        .await
        .map_err(fail())?;

        write_muscle_groups(&mut tx, &id, &data.muscle_group_ids)
            .await
            .map_err(fail())?;
        write_equipment(&mut tx, &id, &data.equipment_ids)
            .await
            .map_err(fail())?;
        write_difficulties(&mut tx, &id, &data.difficulty)
            .await
            .map_err(fail())?;
        write_movements(&mut tx, &id, &data.movements)
            .await
            .map_err(fail())?;
        write_images(&mut tx, &id, &data.image_urls)
            .await
            .map_err(fail())?;

        tx.commit().await.map_err(fail())?;

        self.find_by_id(&id).await
    }

    async fn update(&self, id: &str, data: ExercisePatch) -> Result<Exercise, RepositoryError> {
        validate_id(ENTITY, id)?;
        log_operation(ENTITY, Operation::Update, Some(id));
        let fail = || storage_error(ENTITY, Operation::Update);

        let mut tx = self.db.pool().begin().await.map_err(fail())?;

        let mut query: QueryBuilder<Sqlite> = QueryBuilder::new("UPDATE exercises SET ");
        let mut fields = query.separated(", ");
        if let Some(name) = data.name {
            fields.push("name = ").push_bind_unseparated(name);
        }
        if let Some(description) = data.description {
            fields.push("description = ").push_bind_unseparated(description);
        }
        if let Some(exercise_type) = data.exercise_type {
            fields
                .push("exercise_type = ")
                .push_bind_unseparated(exercise_type.as_str());
        }
        if let Some(video_url) = data.video_url {
            fields.push("video_url = ").push_bind_unseparated(video_url);
        }
        if let Some(is_archived) = data.is_archived {
            fields.push("is_archived = ").push_bind_unseparated(is_archived);
        }
        fields
            .push("updated_at = ")
            .push_bind_unseparated(format_storage_timestamp(now()));
        query.push(" WHERE id = ").push_bind(id);

        let result = query.build().execute(&mut *tx).await.map_err(fail())?;
        if result.rows_affected() == 0 {
            return Err(not_found(ENTITY, id));
        }

        if let Some(ids) = &data.muscle_group_ids {
            ensure_referenced(&mut tx, Entity::MuscleGroup, ids, (ENTITY, Operation::Update))
                .await?;
            write_muscle_groups(&mut tx, id, ids).await.map_err(fail())?;
        }
        if let Some(ids) = &data.equipment_ids {
            ensure_referenced(&mut tx, Entity::Equipment, ids, (ENTITY, Operation::Update)).await?;
            write_equipment(&mut tx, id, ids).await.map_err(fail())?;
        }
        if let Some(values) = &data.difficulty {
            write_difficulties(&mut tx, id, values)
                .await
                .map_err(fail())?;
        }
        if let Some(values) = &data.movements {
            write_movements(&mut tx, id, values).await.map_err(fail())?;
        }
        if let Some(urls) = &data.image_urls {
            write_images(&mut tx, id, urls).await.map_err(fail())?;
        }

        tx.commit().await.map_err(fail())?;

        self.find_by_id(id).await
    }

    async fn delete(&self, id: &str) -> Result<(), RepositoryError> {
        validate_id(ENTITY, id)?;
        log_operation(ENTITY, Operation::Delete, Some(id));

        let result = match sqlx::query("DELETE FROM exercises WHERE id = ?")
            .bind(id)
            .execute(self.db.pool())
            .await
        {
            Ok(result) => result,
            // Logged workouts still point at it; archive instead.
            Err(err) if is_foreign_key_violation(&err) => {
                return Err(RepositoryError::InUse {
                    entity: ENTITY,
                    id: id.to_string(),
                })
            }
            Err(err) => return Err(storage_error(ENTITY, Operation::Delete)(err)),
        };
        if result.rows_affected() == 0 {
            return Err(not_found(ENTITY, id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::equipment::NewEquipment;
    use crate::models::muscle_group::NewMuscleGroup;
    use crate::models::{BodyRegion, ExerciseType};
    use crate::repositories::{EquipmentRepository, MuscleGroupRepository};

    struct Fixture {
        exercises: ExerciseRepository,
        chest: String,
        quads: String,
        barbell: String,
    }

    async fn fixture() -> Fixture {
        let db = Database::in_memory().await.unwrap();
        let groups = MuscleGroupRepository::new(db.clone());
        let equipment = EquipmentRepository::new(db.clone());

        let chest = groups
            .create(NewMuscleGroup {
                name: "Chest".to_string(),
                description: "Pectorals".to_string(),
                body: BodyRegion::Upper,
            })
            .await
            .unwrap();
        let quads = groups
            .create(NewMuscleGroup {
                name: "Quadriceps".to_string(),
                description: "Front of thigh".to_string(),
                body: BodyRegion::Lower,
            })
            .await
            .unwrap();
        let barbell = equipment
            .create(NewEquipment {
                name: "Barbell".to_string(),
                description: "Olympic bar".to_string(),
                category: "Free weights".to_string(),
            })
            .await
            .unwrap();

        Fixture {
            exercises: ExerciseRepository::new(db),
            chest: chest.id,
            quads: quads.id,
            barbell: barbell.id,
        }
    }

    fn exercise(name: &str, muscle_group_ids: Vec<String>) -> NewExercise {
        NewExercise {
            name: name.to_string(),
            description: String::new(),
            exercise_type: ExerciseType::Strength,
            muscle_group_ids,
            difficulty: vec![Difficulty::Beginner],
            equipment_ids: Vec::new(),
            movements: Vec::new(),
            video_url: None,
            image_urls: Vec::new(),
            is_archived: false,
        }
    }

    #[tokio::test]
    async fn test_create_resolves_relations_in_order() {
        let f = fixture().await;
        let mut data = exercise("Front Squat", vec![f.quads.clone(), f.chest.clone(), f.quads.clone()]);
        data.equipment_ids = vec![f.barbell.clone()];
        data.movements = vec![Movement::Squat, Movement::Core];
        data.image_urls = vec!["https://img/2.png".to_string(), "https://img/1.png".to_string()];

        let created = f.exercises.create(data).await.unwrap();

        let group_ids: Vec<_> = created.muscle_groups.iter().map(|g| g.id.clone()).collect();
        assert_eq!(group_ids, [f.quads.clone(), f.chest.clone()]);
        assert_eq!(created.equipment[0].name, "Barbell");
        assert_eq!(created.movements, [Movement::Squat, Movement::Core]);
        assert_eq!(created.image_urls[0], "https://img/2.png");
        assert_eq!(created.last_used_at, None);

        assert_eq!(f.exercises.find_by_id(&created.id).await.unwrap(), created);
    }

    #[tokio::test]
    async fn test_create_rejects_unknown_muscle_group() {
        let f = fixture().await;
        let missing = new_id();

        let err = f
            .exercises
            .create(exercise("Ghost", vec![missing.clone()]))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            RepositoryError::NotFound { entity: Entity::MuscleGroup, ref id } if *id == missing
        ));

        let all = f.exercises.find_all(&ExerciseFilter::default()).await.unwrap();
        assert!(all.is_empty());
    }

    #[tokio::test]
    async fn test_find_all_filters() {
        let f = fixture().await;
        let bench = f
            .exercises
            .create(exercise("Bench Press", vec![f.chest.clone()]))
            .await
            .unwrap();
        let squat = f
            .exercises
            .create(exercise("Back Squat", vec![f.quads.clone()]))
            .await
            .unwrap();
        let mut archived = exercise("Old Fly", vec![f.chest.clone()]);
        archived.is_archived = true;
        f.exercises.create(archived).await.unwrap();

        let lower = f
            .exercises
            .find_all(&ExerciseFilter {
                body: Some(BodyRegion::Lower),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(lower.len(), 1);
        assert_eq!(lower[0].id, squat.id);

        let active_chest = f
            .exercises
            .find_all(&ExerciseFilter {
                muscle_group_ids: vec![f.chest.clone()],
                is_archived: Some(false),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(active_chest.len(), 1);
        assert_eq!(active_chest[0].id, bench.id);

        let named = f
            .exercises
            .find_all(&ExerciseFilter {
                name: Some("squat".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(named.len(), 1);

        let everything = f.exercises.find_all(&ExerciseFilter::default()).await.unwrap();
        assert_eq!(everything.len(), 3);
        // Most recently updated first
        assert_eq!(everything[0].name, "Old Fly");
    }

    #[tokio::test]
    async fn test_update_replaces_lists_and_keeps_others() {
        let f = fixture().await;
        let created = f
            .exercises
            .create(exercise("Push Up", vec![f.chest.clone()]))
            .await
            .unwrap();

        let updated = f
            .exercises
            .update(
                &created.id,
                ExercisePatch {
                    difficulty: Some(vec![Difficulty::Intermediate, Difficulty::Advanced]),
                    video_url: Some(Some("https://video".to_string())),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "Push Up");
        assert_eq!(updated.muscle_groups.len(), 1);
        assert_eq!(updated.difficulty, [Difficulty::Intermediate, Difficulty::Advanced]);
        assert_eq!(updated.video_url.as_deref(), Some("https://video"));
    }

    #[tokio::test]
    async fn test_update_and_delete_missing() {
        let f = fixture().await;
        let id = new_id();

        let err = f
            .exercises
            .update(&id, ExercisePatch::default())
            .await
            .unwrap_err();
        assert!(err.is_not_found());

        let err = f.exercises.delete(&id).await.unwrap_err();
        assert!(err.is_not_found());

        let err = f.exercises.delete("nope").await.unwrap_err();
        assert!(matches!(err, RepositoryError::InvalidId { .. }));
    }

    #[tokio::test]
    async fn test_deleting_muscle_group_detaches_it() {
        let f = fixture().await;
        let created = f
            .exercises
            .create(exercise("Lunge", vec![f.quads.clone(), f.chest.clone()]))
            .await
            .unwrap();

        MuscleGroupRepository::new(f.exercises.db.clone())
            .delete(&f.chest)
            .await
            .unwrap();

        let found = f.exercises.find_by_id(&created.id).await.unwrap();
        assert_eq!(found.muscle_groups.len(), 1);
        assert_eq!(found.muscle_groups[0].id, f.quads);
    }
}
