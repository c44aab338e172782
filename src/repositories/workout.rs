// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout persistence.
//!
//! A workout owns its exercises and their sets. The whole tree is written in
//! one transaction and read back in `position` order.

use super::{
    dedup_in_order, ensure_referenced, get_optional_timestamp, get_tag, get_timestamp, get_u32,
    log_operation, new_id, not_found, now, storage_error, validate_id, Entity, Operation,
    Repository, RepositoryError,
};
use crate::db::Database;
use crate::models::workout::{NewWorkout, NewWorkoutExercise, WorkoutFilter, WorkoutPatch};
use crate::models::{Workout, WorkoutExercise, WorkoutSet};
use crate::time_utils::{format_storage_timestamp, MmSs};
use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, Sqlite, SqliteConnection};

const ENTITY: Entity = Entity::Workout;

const COLUMNS: &str =
    "id, user_id, name, description, notes, start_time, end_time, created_at, updated_at";

#[derive(Clone)]
pub struct WorkoutRepository {
    db: Database,
}

fn row_to_workout(row: &SqliteRow) -> Result<Workout, sqlx::Error> {
    Ok(Workout {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        notes: row.try_get("notes")?,
        start_time: get_timestamp(row, "start_time")?,
        end_time: get_optional_timestamp(row, "end_time")?,
        exercises: Vec::new(),
        created_at: get_timestamp(row, "created_at")?,
        updated_at: get_timestamp(row, "updated_at")?,
    })
}

fn row_to_workout_exercise(row: &SqliteRow) -> Result<WorkoutExercise, sqlx::Error> {
    Ok(WorkoutExercise {
        id: row.try_get("id")?,
        workout_id: row.try_get("workout_id")?,
        exercise_id: row.try_get("exercise_id")?,
        sets: Vec::new(),
        position: get_u32(row, "position")?,
        rest_after: MmSs::from_column(row.try_get("rest_after_seconds")?),
        notes: row.try_get("notes")?,
        created_at: get_timestamp(row, "created_at")?,
        updated_at: get_timestamp(row, "updated_at")?,
    })
}

fn row_to_set(row: &SqliteRow) -> Result<WorkoutSet, sqlx::Error> {
    Ok(WorkoutSet {
        id: row.try_get("id")?,
        workout_exercise_id: row.try_get("workout_exercise_id")?,
        reps: get_u32(row, "reps")?,
        weight: row.try_get("weight")?,
        duration: MmSs::from_column(row.try_get("duration_seconds")?),
        rest: MmSs::from_column(row.try_get("rest_seconds")?),
        rest_taken: MmSs::from_column(row.try_get("rest_taken_seconds")?),
        notes: row.try_get("notes")?,
        is_personal_record: row.try_get("is_personal_record")?,
        effort: get_tag(row, "effort")?,
        position: get_u32(row, "position")?,
        created_at: get_timestamp(row, "created_at")?,
        updated_at: get_timestamp(row, "updated_at")?,
    })
}

impl WorkoutRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Load the exercises and sets of a workout.
    async fn hydrate(&self, mut workout: Workout) -> Result<Workout, sqlx::Error> {
        let pool = self.db.pool();

        let mut exercises = sqlx::query(
            r"
            SELECT id, workout_id, exercise_id, position, rest_after_seconds, notes,
                   created_at, updated_at
            FROM workout_exercises
            WHERE workout_id = ?
            ORDER BY position
            ",
        )
        .bind(&workout.id)
        .fetch_all(pool)
        .await?
        .iter()
        .map(row_to_workout_exercise)
        .collect::<Result<Vec<_>, _>>()?;

        let sets = sqlx::query(
            r"
            SELECT s.id, s.workout_exercise_id, s.reps, s.weight, s.duration_seconds,
                   s.rest_seconds, s.rest_taken_seconds, s.notes, s.is_personal_record,
                   s.effort, s.position, s.created_at, s.updated_at
            FROM sets s
            JOIN workout_exercises we ON we.id = s.workout_exercise_id
            WHERE we.workout_id = ?
            ORDER BY s.position
            ",
        )
        .bind(&workout.id)
        .fetch_all(pool)
        .await?;

        for row in &sets {
            let set = row_to_set(row)?;
            if let Some(parent) = exercises
                .iter_mut()
                .find(|we| we.id == set.workout_exercise_id)
            {
                parent.sets.push(set);
            }
        }

        workout.exercises = exercises;
        Ok(workout)
    }
}

/// Insert the exercise tree of a workout and stamp each exercise as used.
async fn insert_children(
    conn: &mut SqliteConnection,
    workout_id: &str,
    exercises: &[NewWorkoutExercise],
    stamp: &str,
) -> Result<(), sqlx::Error> {
    for (position, exercise) in exercises.iter().enumerate() {
        let workout_exercise_id = new_id();
        sqlx::query(
            r"
            INSERT INTO workout_exercises (id, workout_id, exercise_id, position,
                                           rest_after_seconds, notes, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            ",
        )
        .bind(&workout_exercise_id)
        .bind(workout_id)
        .bind(&exercise.exercise_id)
        .bind(position as i64)
        .bind(MmSs::to_column(exercise.rest_after))
        .bind(&exercise.notes)
        .bind(stamp)
        .bind(stamp)
        .execute(&mut *conn)
        .await?;

        for (set_position, set) in exercise.sets.iter().enumerate() {
            sqlx::query(
                r"
                INSERT INTO sets (id, workout_exercise_id, reps, weight, duration_seconds,
                                  rest_seconds, rest_taken_seconds, notes, is_personal_record,
                                  effort, position, created_at, updated_at)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                ",
            )
            .bind(new_id())
            .bind(&workout_exercise_id)
            .bind(i64::from(set.reps))
            .bind(set.weight)
            .bind(MmSs::to_column(set.duration))
            .bind(MmSs::to_column(set.rest))
            .bind(MmSs::to_column(set.rest_taken))
            .bind(&set.notes)
            .bind(set.is_personal_record)
            .bind(set.effort.as_str())
            .bind(set_position as i64)
            .bind(stamp)
            .bind(stamp)
            .execute(&mut *conn)
            .await?;
        }
    }

    for exercise_id in dedup_in_order(&exercise_ids(exercises)) {
        sqlx::query("UPDATE exercises SET last_used_at = ? WHERE id = ?")
            .bind(stamp)
            .bind(&exercise_id)
            .execute(&mut *conn)
            .await?;
    }
    Ok(())
}

fn exercise_ids(exercises: &[NewWorkoutExercise]) -> Vec<String> {
    exercises.iter().map(|e| e.exercise_id.clone()).collect()
}

#[async_trait]
impl Repository for WorkoutRepository {
    type Entity = Workout;
    type Filter = WorkoutFilter;
    type Create = NewWorkout;
    type Update = WorkoutPatch;

    async fn find_by_id(&self, id: &str) -> Result<Workout, RepositoryError> {
        validate_id(ENTITY, id)?;
        log_operation(ENTITY, Operation::FindById, Some(id));

        let row = sqlx::query(&format!("SELECT {COLUMNS} FROM workouts WHERE id = ?"))
            .bind(id)
            .fetch_optional(self.db.pool())
            .await
            .map_err(storage_error(ENTITY, Operation::FindById))?
            .ok_or_else(|| not_found(ENTITY, id))?;

        let workout = row_to_workout(&row).map_err(storage_error(ENTITY, Operation::FindById))?;
        self.hydrate(workout)
            .await
            .map_err(storage_error(ENTITY, Operation::FindById))
    }

    async fn find_all(&self, filter: &WorkoutFilter) -> Result<Vec<Workout>, RepositoryError> {
        log_operation(ENTITY, Operation::FindAll, None);

        let mut query: QueryBuilder<Sqlite> =
            QueryBuilder::new(format!("SELECT {COLUMNS} FROM workouts WHERE 1 = 1"));
        if let Some(user_id) = &filter.user_id {
            query.push(" AND user_id = ").push_bind(user_id.clone());
        }
        if let Some(from) = filter.from {
            query
                .push(" AND start_time >= ")
                .push_bind(format_storage_timestamp(from));
        }
        if let Some(to) = filter.to {
            query
                .push(" AND start_time <= ")
                .push_bind(format_storage_timestamp(to));
        }
        query.push(" ORDER BY start_time DESC, rowid DESC");

        let rows = query
            .build()
            .fetch_all(self.db.pool())
            .await
            .map_err(storage_error(ENTITY, Operation::FindAll))?;

        let mut workouts = Vec::with_capacity(rows.len());
        for row in &rows {
            let workout = row_to_workout(row).map_err(storage_error(ENTITY, Operation::FindAll))?;
            workouts.push(
                self.hydrate(workout)
                    .await
                    .map_err(storage_error(ENTITY, Operation::FindAll))?,
            );
        }
        Ok(workouts)
    }

    async fn create(&self, data: NewWorkout) -> Result<Workout, RepositoryError> {
        log_operation(ENTITY, Operation::Create, None);
        let fail = || storage_error(ENTITY, Operation::Create);

        let id = new_id();
        let stamp = format_storage_timestamp(now());

        let mut tx = self.db.pool().begin().await.map_err(fail())?;

        ensure_referenced(&mut tx, Entity::User, &[data.user_id.clone()], (ENTITY, Operation::Create))
            .await?;
        ensure_referenced(
            &mut tx,
            Entity::Exercise,
            &exercise_ids(&data.exercises),
            (ENTITY, Operation::Create),
        )
        .await?;

        sqlx::query(
            r"
            INSERT INTO workouts (id, user_id, name, description, notes, start_time, end_time,
                                  created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            ",
        )
        .bind(&id)
        .bind(&data.user_id)
        .bind(&data.name)
        .bind(&data.description)
        .bind(&data.notes)
        .bind(format_storage_timestamp(data.start_time))
        .bind(data.end_time.map(format_storage_timestamp))
        .bind(&stamp)
        .bind(&stamp)
        .execute(&mut *tx)
        .await
        .map_err(fail())?;

        insert_children(&mut tx, &id, &data.exercises, &stamp)
            .await
            .map_err(fail())?;

        tx.commit().await.map_err(fail())?;

        tracing::info!(
            workout_id = %id,
            exercises = data.exercises.len(),
            "Workout created"
        );
        self.find_by_id(&id).await
    }

    async fn update(&self, id: &str, data: WorkoutPatch) -> Result<Workout, RepositoryError> {
        validate_id(ENTITY, id)?;
        log_operation(ENTITY, Operation::Update, Some(id));
        let fail = || storage_error(ENTITY, Operation::Update);

        let stamp = format_storage_timestamp(now());
        let mut tx = self.db.pool().begin().await.map_err(fail())?;

        let mut query: QueryBuilder<Sqlite> = QueryBuilder::new("UPDATE workouts SET ");
        let mut fields = query.separated(", ");
        if let Some(name) = data.name {
            fields.push("name = ").push_bind_unseparated(name);
        }
        if let Some(description) = data.description {
            fields.push("description = ").push_bind_unseparated(description);
        }
        if let Some(notes) = data.notes {
            fields.push("notes = ").push_bind_unseparated(notes);
        }
        if let Some(start_time) = data.start_time {
            fields
                .push("start_time = ")
                .push_bind_unseparated(format_storage_timestamp(start_time));
        }
        if let Some(end_time) = data.end_time {
            fields
                .push("end_time = ")
                .push_bind_unseparated(end_time.map(format_storage_timestamp));
        }
        fields.push("updated_at = ").push_bind_unseparated(stamp.clone());
        query.push(" WHERE id = ").push_bind(id);

        let result = query.build().execute(&mut *tx).await.map_err(fail())?;
        if result.rows_affected() == 0 {
            return Err(not_found(ENTITY, id));
        }

        if let Some(exercises) = &data.exercises {
            ensure_referenced(
                &mut tx,
                Entity::Exercise,
                &exercise_ids(exercises),
                (ENTITY, Operation::Update),
            )
            .await?;

            // Sets cascade; personal records keep their row with set_id cleared.
            sqlx::query("DELETE FROM workout_exercises WHERE workout_id = ?")
                .bind(id)
                .execute(&mut *tx)
                .await
                .map_err(fail())?;
            insert_children(&mut tx, id, exercises, &stamp)
                .await
                .map_err(fail())?;
        }

        tx.commit().await.map_err(fail())?;

        self.find_by_id(id).await
    }

    async fn delete(&self, id: &str) -> Result<(), RepositoryError> {
        validate_id(ENTITY, id)?;
        log_operation(ENTITY, Operation::Delete, Some(id));

        let result = sqlx::query("DELETE FROM workouts WHERE id = ?")
            .bind(id)
            .execute(self.db.pool())
            .await
            .map_err(storage_error(ENTITY, Operation::Delete))?;
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
    use crate::models::exercise::NewExercise;
    use crate::models::muscle_group::NewMuscleGroup;
    use crate::models::user::NewUser;
    use crate::models::workout::NewWorkoutSet;
    use crate::models::{BodyRegion, Effort, ExerciseType};
    use crate::repositories::{
        EquipmentRepository, ExerciseRepository, MuscleGroupRepository, UserRepository,
    };
    use chrono::{DateTime, TimeZone, Utc};

    struct Fixture {
        db: Database,
        workouts: WorkoutRepository,
        user_id: String,
        squat: String,
        row: String,
        /// Attached to the squat
        quads: String,
        barbell: String,
    }

    async fn fixture() -> Fixture {
        let db = Database::in_memory().await.unwrap();
        let user = UserRepository::new(db.clone())
            .create(NewUser {
                name: Some("Tester".to_string()),
                email: Some("tester@example.com".to_string()),
                email_verified: None,
                image: None,
            })
            .await
            .unwrap();

        let quads = MuscleGroupRepository::new(db.clone())
            .create(NewMuscleGroup {
                name: "Quadriceps".to_string(),
                description: "Front thigh".to_string(),
                body: BodyRegion::Lower,
            })
            .await
            .unwrap();
        let barbell = EquipmentRepository::new(db.clone())
            .create(NewEquipment {
                name: "Barbell".to_string(),
                description: "Olympic bar".to_string(),
                category: "Free weights".to_string(),
            })
            .await
            .unwrap();

        let exercises = ExerciseRepository::new(db.clone());
        let mut ids = Vec::new();
        for (name, attach) in [("Squat", true), ("Row", false)] {
            let created = exercises
                .create(NewExercise {
                    name: name.to_string(),
                    description: String::new(),
                    exercise_type: ExerciseType::Strength,
                    muscle_group_ids: if attach { vec![quads.id.clone()] } else { Vec::new() },
                    difficulty: Vec::new(),
                    equipment_ids: if attach { vec![barbell.id.clone()] } else { Vec::new() },
                    movements: Vec::new(),
                    video_url: None,
                    image_urls: Vec::new(),
                    is_archived: false,
                })
                .await
                .unwrap();
            ids.push(created.id);
        }

        Fixture {
            workouts: WorkoutRepository::new(db.clone()),
            db,
            user_id: user.id,
            row: ids.pop().unwrap(),
            squat: ids.pop().unwrap(),
            quads: quads.id,
            barbell: barbell.id,
        }
    }

    fn set(reps: u32, weight: f64) -> NewWorkoutSet {
        NewWorkoutSet {
            reps,
            weight: Some(weight),
            duration: None,
            rest: Some(MmSs::from_seconds(90)),
            rest_taken: None,
            notes: String::new(),
            is_personal_record: false,
            effort: Effort::Challenging,
        }
    }

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, hour, 0, 0).unwrap()
    }

    fn workout(f: &Fixture, start: DateTime<Utc>, exercises: Vec<NewWorkoutExercise>) -> NewWorkout {
        NewWorkout {
            user_id: f.user_id.clone(),
            name: "Leg day".to_string(),
            description: None,
            notes: String::new(),
            start_time: start,
            end_time: None,
            exercises,
        }
    }

    fn child(exercise_id: &str, sets: Vec<NewWorkoutSet>) -> NewWorkoutExercise {
        NewWorkoutExercise {
            exercise_id: exercise_id.to_string(),
            rest_after: None,
            notes: None,
            sets,
        }
    }

    #[tokio::test]
    async fn test_create_keeps_tree_order() {
        let f = fixture().await;
        let data = workout(
            &f,
            at(9),
            vec![
                child(&f.squat, vec![set(5, 100.0), set(5, 105.0), set(3, 110.0)]),
                child(&f.row, vec![set(8, 60.0)]),
            ],
        );

        let created = f.workouts.create(data).await.unwrap();

        assert_eq!(created.exercises.len(), 2);
        assert_eq!(created.exercises[0].exercise_id, f.squat);
        assert_eq!(created.exercises[1].position, 1);
        let weights: Vec<_> = created.exercises[0].sets.iter().map(|s| s.weight).collect();
        assert_eq!(weights, [Some(100.0), Some(105.0), Some(110.0)]);
        assert_eq!(created.exercises[0].sets[0].rest, Some(MmSs::from_seconds(90)));
        assert_eq!(created.exercises[0].sets[0].duration, None);
        assert_eq!(created.set_count(), 4);

        let squat = ExerciseRepository::new(f.db.clone())
            .find_by_id(&f.squat)
            .await
            .unwrap();
        assert!(squat.last_used_at.is_some());
    }

    #[tokio::test]
    async fn test_create_with_unknown_exercise_writes_nothing() {
        let f = fixture().await;
        let missing = new_id();

        let err = f
            .workouts
            .create(workout(&f, at(9), vec![child(&missing, vec![set(1, 1.0)])]))
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound { entity: Entity::Exercise, .. }));

        let all = f.workouts.find_all(&WorkoutFilter::default()).await.unwrap();
        assert!(all.is_empty());
    }

    #[tokio::test]
    async fn test_update_replaces_children() {
        let f = fixture().await;
        let created = f
            .workouts
            .create(workout(&f, at(9), vec![child(&f.squat, vec![set(5, 100.0)])]))
            .await
            .unwrap();
        let old_child = created.exercises[0].id.clone();

        let updated = f
            .workouts
            .update(
                &created.id,
                WorkoutPatch {
                    name: Some("Pull day".to_string()),
                    exercises: Some(vec![child(&f.row, vec![set(10, 50.0), set(10, 50.0)])]),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "Pull day");
        assert_eq!(updated.exercises.len(), 1);
        assert_eq!(updated.exercises[0].exercise_id, f.row);
        assert_ne!(updated.exercises[0].id, old_child);
        assert_eq!(updated.set_count(), 2);

        let untouched = f
            .workouts
            .update(&created.id, WorkoutPatch::default())
            .await
            .unwrap();
        assert_eq!(untouched.exercises, updated.exercises);
    }

    #[tokio::test]
    async fn test_find_all_filters_by_owner_and_range() {
        let f = fixture().await;
        for hour in [8, 12, 18] {
            f.workouts.create(workout(&f, at(hour), Vec::new())).await.unwrap();
        }

        let ranged = f
            .workouts
            .find_all(&WorkoutFilter {
                user_id: Some(f.user_id.clone()),
                from: Some(at(12)),
                to: Some(at(18)),
            })
            .await
            .unwrap();
        let starts: Vec<_> = ranged.iter().map(|w| w.start_time).collect();
        assert_eq!(starts, [at(18), at(12)]);

        let other = f
            .workouts
            .find_all(&WorkoutFilter {
                user_id: Some(new_id()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(other.is_empty());
    }

    #[tokio::test]
    async fn test_delete_cascades_to_children_only() {
        let f = fixture().await;
        let created = f
            .workouts
            .create(workout(&f, at(9), vec![child(&f.squat, vec![set(5, 100.0)])]))
            .await
            .unwrap();

        f.workouts.delete(&created.id).await.unwrap();

        let count = |table: &'static str| {
            let pool = f.db.pool().clone();
            async move {
                sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {table}"))
                    .fetch_one(&pool)
                    .await
                    .unwrap()
            }
        };
        assert_eq!(count("workout_exercises").await, 0);
        assert_eq!(count("sets").await, 0);
        assert!(f.workouts.find_by_id(&created.id).await.unwrap_err().is_not_found());

        // Reference data and its links are untouched.
        let squat = ExerciseRepository::new(f.db.clone())
            .find_by_id(&f.squat)
            .await
            .unwrap();
        assert_eq!(squat.muscle_groups[0].id, f.quads);
        assert_eq!(squat.equipment[0].id, f.barbell);
        MuscleGroupRepository::new(f.db.clone())
            .find_by_id(&f.quads)
            .await
            .unwrap();
        EquipmentRepository::new(f.db.clone())
            .find_by_id(&f.barbell)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_exercise_in_use_cannot_be_deleted() {
        let f = fixture().await;
        f.workouts
            .create(workout(&f, at(9), vec![child(&f.squat, Vec::new())]))
            .await
            .unwrap();

        let err = ExerciseRepository::new(f.db.clone())
            .delete(&f.squat)
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::InUse { entity: Entity::Exercise, .. }));
    }
}
