//! Diesel table definitions. Must match `migrations/` exactly.

diesel::table! {
    /// Submitted RSVPs. Append-only apart from `confirmation_id`.
    rsvps (id) {
        id -> Int8,
        name -> Text,
        email -> Text,
        /// `yes` or `no`, enforced by a CHECK constraint.
        attendance -> Varchar,
        dietary_requirements -> Nullable<Text>,
        confirmation_id -> Nullable<Text>,
        rsvp_date -> Timestamptz,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Invitations. Several rows may share an email; the newest wins.
    invites (id) {
        id -> Int8,
        name -> Text,
        email -> Text,
        /// `pending`, `sent`, `responded` or `declined`.
        status -> Varchar,
        invite_url -> Nullable<Text>,
        sent_at -> Nullable<Timestamptz>,
        rsvp_id -> Nullable<Int8>,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(invites -> rsvps (rsvp_id));
diesel::allow_tables_to_appear_in_same_query!(invites, rsvps);
