table! {
    posts (id) {
        id -> Integer,
        title -> Text,
        content -> Text,
        author -> Text,
        created_at -> Timestamp,
        updated_at -> Timestamp,
    }
}

table! {
    comments (id) {
        id -> Integer,
        post_id -> Integer,
        content -> Text,
        author -> Text,
        created_at -> Timestamp,
        updated_at -> Timestamp,
    }
}

joinable!(comments -> posts (post_id));

allow_tables_to_appear_in_same_query!(comments, posts,);
