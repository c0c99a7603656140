//! 用户页面渲染
//!
//! 纯函数：输入数据，输出 HTML。所有插值内容都经过转义。

use super::model::{SearchResults, User};
use crate::core::response::escape;

fn layout(title: &str, search_value: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{title}</title>
  <link rel="stylesheet" href="/static/css/style.css">
</head>
<body>
  <header class="navbar">
    <a class="brand" href="/">User Management</a>
    <form class="search" action="/search" method="get">
      <input type="search" name="q" placeholder="Search name or email (Ctrl+K)" value="{search}">
      <button type="submit">Search</button>
    </form>
    <a class="button" href="/create">Add User</a>
  </header>
  <main class="container">
{body}
  </main>
  <script src="/static/js/script.js"></script>
</body>
</html>
"#,
        title = escape(title),
        search = escape(search_value),
        body = body,
    )
}

fn users_table(users: &[User]) -> String {
    let rows = users
        .iter()
        .map(|user| {
            format!(
                r#"        <tr>
          <td>{name}</td>
          <td>{email}</td>
          <td>{age}</td>
          <td class="actions">
            <a href="/edit/{id}">Edit</a>
            <a href="/delete/{id}" class="danger" onclick="return confirm('Delete this user?');">Delete</a>
          </td>
        </tr>
"#,
                name = escape(&user.name),
                email = escape(&user.email),
                age = user.age,
                id = user.id,
            )
        })
        .collect::<String>();

    format!(
        r#"    <table class="users">
      <thead>
        <tr><th>Name</th><th>Email</th><th>Age</th><th>Actions</th></tr>
      </thead>
      <tbody>
{rows}      </tbody>
    </table>
"#
    )
}

fn user_form(action: &str, submit: &str, name: &str, email: &str, age: &str) -> String {
    format!(
        r#"    <form class="user-form" action="{action}" method="post" novalidate>
      <label for="name">Name</label>
      <input id="name" type="text" name="name" value="{name}" required>
      <label for="email">Email</label>
      <input id="email" type="email" name="email" value="{email}" required>
      <label for="age">Age</label>
      <input id="age" type="number" name="age" value="{age}" required>
      <div class="form-actions">
        <button type="submit">{submit}</button>
        <a href="/">Cancel</a>
      </div>
    </form>
"#,
        action = escape(action),
        name = escape(name),
        email = escape(email),
        age = escape(age),
        submit = escape(submit),
    )
}

pub fn index_page(users: &[User]) -> String {
    let body = if users.is_empty() {
        r#"    <h1>Users</h1>
    <p class="empty">No users yet. <a href="/create">Create the first one</a>.</p>
"#
        .to_string()
    } else {
        format!("    <h1>Users</h1>\n{}", users_table(users))
    };
    layout("Users", "", &body)
}

pub fn create_page() -> String {
    let body = format!(
        "    <h1>Create User</h1>\n{}",
        user_form("/create", "Create", "", "", "")
    );
    layout("Create User", "", &body)
}

pub fn edit_page(user: &User) -> String {
    let action = format!("/update/{}", user.id);
    let body = format!(
        "    <h1>Edit User</h1>\n{}",
        user_form(
            &action,
            "Update",
            &user.name,
            &user.email,
            &user.age.to_string()
        )
    );
    layout("Edit User", "", &body)
}

pub fn search_page(results: &SearchResults) -> String {
    let summary = format!(
        "    <h1>Search Results</h1>\n    <p class=\"summary\">Found {} user(s) matching &quot;{}&quot;</p>\n",
        results.count,
        escape(&results.query)
    );
    let listing = if results.users.is_empty() {
        "    <p class=\"empty\">No users match your search. <a href=\"/\">Back to all users</a>.</p>\n"
            .to_string()
    } else {
        users_table(&results.users)
    };
    layout("Search Results", &results.query, &(summary + &listing))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::users::model::UserId;

    fn user(name: &str, email: &str, age: i64) -> User {
        User {
            id: UserId::new(),
            name: name.to_string(),
            email: email.to_string(),
            age,
        }
    }

    #[test]
    fn test_index_lists_users_with_links() {
        let bob = user("Bob", "bob@x.com", 30);
        let html = index_page(std::slice::from_ref(&bob));
        assert!(html.contains("<td>Bob</td>"));
        assert!(html.contains("<td>30</td>"));
        assert!(html.contains(&format!("/edit/{}", bob.id)));
        assert!(html.contains(&format!("/delete/{}", bob.id)));
    }

    #[test]
    fn test_index_renders_one_row_per_user_in_order() {
        let users = [user("Ann", "a@x.com", 1), user("Bob", "b@x.com", 2)];
        let html = index_page(&users);
        assert_eq!(html.matches("<tr>").count(), 3);
        let ann = html.find("<td>Ann</td>").unwrap();
        let bob = html.find("<td>Bob</td>").unwrap();
        assert!(ann < bob);
    }

    #[test]
    fn test_index_escapes_user_content() {
        let html = index_page(&[user("<script>alert(1)</script>", "x@x.com", 1)]);
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_edit_form_prefilled() {
        let ann = user("Ann Lee", "ann@example.com", 41);
        let html = edit_page(&ann);
        assert!(html.contains(&format!("action=\"/update/{}\"", ann.id)));
        assert!(html.contains("value=\"Ann Lee\""));
        assert!(html.contains("value=\"ann@example.com\""));
        assert!(html.contains("value=\"41\""));
    }

    #[test]
    fn test_search_page_shows_query_and_count() {
        let results = SearchResults::new(
            "ann".to_string(),
            vec![user("Ann Lee", "a@x.com", 1), user("Bob", "Anna@example.com", 2)],
        );
        let html = search_page(&results);
        assert!(html.contains("Found 2 user(s) matching &quot;ann&quot;"));
        assert!(html.contains("value=\"ann\""));

        let empty = search_page(&SearchResults::new("zzz".to_string(), Vec::new()));
        assert!(empty.contains("No users match your search"));
    }
}
