// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Relational schema.
//!
//! Ordered tag and relation lists live in child tables with a `position`
//! column. Timestamps are fixed-width RFC3339 text, ids are UUID text.

pub const STATEMENTS: &[&str] = &[
    r"
    CREATE TABLE IF NOT EXISTS users (
        id TEXT PRIMARY KEY,
        name TEXT,
        email TEXT UNIQUE,
        email_verified TEXT,
        image TEXT,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )
    ",
    r"
    CREATE TABLE IF NOT EXISTS muscle_groups (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        description TEXT NOT NULL,
        body TEXT NOT NULL,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )
    ",
    r"
    CREATE TABLE IF NOT EXISTS equipment (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        description TEXT NOT NULL,
        category TEXT NOT NULL,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )
    ",
    r"
    CREATE TABLE IF NOT EXISTS exercises (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        description TEXT NOT NULL DEFAULT '',
        exercise_type TEXT NOT NULL,
        video_url TEXT,
        is_archived INTEGER NOT NULL DEFAULT 0,
        last_used_at TEXT,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )
    ",
    r"
    CREATE TABLE IF NOT EXISTS exercise_muscle_groups (
        exercise_id TEXT NOT NULL REFERENCES exercises(id) ON DELETE CASCADE,
        muscle_group_id TEXT NOT NULL REFERENCES muscle_groups(id) ON DELETE CASCADE,
        position INTEGER NOT NULL,
        PRIMARY KEY (exercise_id, muscle_group_id)
    )
    ",
    r"
    CREATE TABLE IF NOT EXISTS exercise_equipment (
        exercise_id TEXT NOT NULL REFERENCES exercises(id) ON DELETE CASCADE,
        equipment_id TEXT NOT NULL REFERENCES equipment(id) ON DELETE CASCADE,
        position INTEGER NOT NULL,
        PRIMARY KEY (exercise_id, equipment_id)
    )
    ",
    r"
    CREATE TABLE IF NOT EXISTS exercise_difficulties (
        exercise_id TEXT NOT NULL REFERENCES exercises(id) ON DELETE CASCADE,
        difficulty TEXT NOT NULL,
        position INTEGER NOT NULL,
        PRIMARY KEY (exercise_id, difficulty)
    )
    ",
    r"
    CREATE TABLE IF NOT EXISTS exercise_movements (
        exercise_id TEXT NOT NULL REFERENCES exercises(id) ON DELETE CASCADE,
        movement TEXT NOT NULL,
        position INTEGER NOT NULL,
        PRIMARY KEY (exercise_id, movement)
    )
    ",
    r"
    CREATE TABLE IF NOT EXISTS exercise_images (
        exercise_id TEXT NOT NULL REFERENCES exercises(id) ON DELETE CASCADE,
        url TEXT NOT NULL,
        position INTEGER NOT NULL,
        PRIMARY KEY (exercise_id, position)
    )
    ",
    r"
    CREATE TABLE IF NOT EXISTS workouts (
        id TEXT PRIMARY KEY,
        user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        name TEXT NOT NULL,
        description TEXT,
        notes TEXT NOT NULL DEFAULT '',
        start_time TEXT NOT NULL,
        end_time TEXT,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )
    ",
    r"
    CREATE TABLE IF NOT EXISTS workout_exercises (
        id TEXT PRIMARY KEY,
        workout_id TEXT NOT NULL REFERENCES workouts(id) ON DELETE CASCADE,
        exercise_id TEXT NOT NULL REFERENCES exercises(id) ON DELETE RESTRICT,
        position INTEGER NOT NULL,
        rest_after_seconds INTEGER,
        notes TEXT,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )
    ",
    r"
    CREATE TABLE IF NOT EXISTS sets (
        id TEXT PRIMARY KEY,
        workout_exercise_id TEXT NOT NULL REFERENCES workout_exercises(id) ON DELETE CASCADE,
        reps INTEGER NOT NULL,
        weight REAL,
        duration_seconds INTEGER,
        rest_seconds INTEGER,
        rest_taken_seconds INTEGER,
        notes TEXT NOT NULL DEFAULT '',
        is_personal_record INTEGER NOT NULL DEFAULT 0,
        effort TEXT NOT NULL,
        position INTEGER NOT NULL,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )
    ",
    r"
    CREATE TABLE IF NOT EXISTS personal_records (
        id TEXT PRIMARY KEY,
        exercise_id TEXT NOT NULL REFERENCES exercises(id) ON DELETE CASCADE,
        workout_id TEXT NOT NULL REFERENCES workouts(id) ON DELETE CASCADE,
        set_id TEXT REFERENCES sets(id) ON DELETE SET NULL,
        kind TEXT NOT NULL,
        value REAL NOT NULL,
        achieved_at TEXT NOT NULL,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )
    ",
    "CREATE INDEX IF NOT EXISTS idx_workouts_user_start ON workouts(user_id, start_time)",
    "CREATE INDEX IF NOT EXISTS idx_workout_exercises_workout ON workout_exercises(workout_id)",
    "CREATE INDEX IF NOT EXISTS idx_sets_workout_exercise ON sets(workout_exercise_id)",
    "CREATE INDEX IF NOT EXISTS idx_exercise_muscle_groups_group ON exercise_muscle_groups(muscle_group_id)",
    "CREATE INDEX IF NOT EXISTS idx_personal_records_exercise ON personal_records(exercise_id)",
];
