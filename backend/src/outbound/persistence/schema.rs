//! Diesel table definitions mirroring the embedded migrations.

diesel::table! {
    users (id) {
        id -> Uuid,
        email -> Varchar,
        name -> Nullable<Text>,
        image -> Nullable<Text>,
        role -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    daily_info (id) {
        id -> Uuid,
        title -> Text,
        description -> Text,
        category -> Varchar,
        priority -> Varchar,
        valid_from -> Timestamptz,
        valid_until -> Nullable<Timestamptz>,
        created_by_id -> Uuid,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    duty_roster (id) {
        id -> Uuid,
        date -> Timestamptz,
        operator_name -> Text,
        shift -> Varchar,
        notes -> Nullable<Text>,
        created_by_id -> Uuid,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    audit_logs (id) {
        id -> Uuid,
        user_id -> Uuid,
        action -> Varchar,
        entity_type -> Varchar,
        entity_id -> Varchar,
        changes -> Nullable<Jsonb>,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(daily_info -> users (created_by_id));
diesel::joinable!(duty_roster -> users (created_by_id));
diesel::joinable!(audit_logs -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(audit_logs, daily_info, duty_roster, users);
