use std::fmt;

/// Roles a member can hold. Stored as their string form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleType {
    Member,
    Admin,
}

impl RoleType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoleType::Member => "ROLE_MEMBER",
            RoleType::Admin => "ROLE_ADMIN",
        }
    }
}

impl fmt::Display for RoleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A member that has not been stored yet.
///
/// `password_hash` is already encoded; raw passwords never reach the store.
#[derive(Debug, Clone)]
pub struct NewMember {
    pub email: String,
    pub password_hash: String,
    pub age: i32,
    pub roles: Vec<String>,
}

impl NewMember {
    pub fn new(email: impl Into<String>, password_hash: impl Into<String>, age: i32) -> Self {
        Self::with_roles(email, password_hash, age, Vec::new())
    }

    /// An empty role list falls back to `ROLE_MEMBER`.
    pub fn with_roles(
        email: impl Into<String>,
        password_hash: impl Into<String>,
        age: i32,
        roles: Vec<String>,
    ) -> Self {
        Self {
            email: email.into(),
            password_hash: password_hash.into(),
            age,
            roles: non_empty_roles(roles),
        }
    }
}

fn non_empty_roles(roles: Vec<String>) -> Vec<String> {
    if roles.is_empty() {
        vec![RoleType::Member.as_str().to_string()]
    } else {
        roles
    }
}

/// A stored member.
///
/// Only `email` and `age` are mutable; password and roles are fixed once the
/// member exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    id: i64,
    email: String,
    password_hash: String,
    age: i32,
    roles: Vec<String>,
}

impl Member {
    pub fn from_parts(
        id: i64,
        email: String,
        password_hash: String,
        age: i32,
        roles: Vec<String>,
    ) -> Self {
        Self {
            id,
            email,
            password_hash,
            age,
            roles: non_empty_roles(roles),
        }
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn age(&self) -> i32 {
        self.age
    }

    pub fn roles(&self) -> &[String] {
        &self.roles
    }

    pub fn update(&mut self, email: impl Into<String>, age: i32) {
        self.email = email.into();
        self.age = age;
    }

    pub fn to_login_member(&self) -> LoginMember {
        LoginMember {
            id: self.id,
            email: self.email.clone(),
            password_hash: self.password_hash.clone(),
            roles: self.roles.clone(),
        }
    }
}

/// Projection of a member used only to build the auth-facing identity.
#[derive(Debug, Clone)]
pub struct LoginMember {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub roles: Vec<String>,
}
