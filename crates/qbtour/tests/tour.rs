use qbtour::models::User;
use qbtour::qb::{self, MutationQb};
use qbtour::{DbConfig, Executor, OrmError, OrmResult, connect_pool, tour};

// The operations share two tables, so the walk through them is one test.
#[tokio::test]
async fn tour_walkthrough() -> OrmResult<()> {
    let _ = dotenvy::dotenv();
    let database_url = match std::env::var("DATABASE_URL") {
        Ok(v) => v,
        Err(_) => {
            eprintln!("DATABASE_URL is not set; skipping tour_walkthrough");
            return Ok(());
        }
    };

    let config = DbConfig::from_url(&database_url)?;
    let pool = connect_pool(&config).await?;
    let mut client = pool.get().await?;

    // /db
    let ids = tour::recreate_users(&client).await?;
    assert_eq!(ids, vec![1, 2]);

    // /db/more
    let users = tour::insert_more_users(&client).await?;
    let names: Vec<_> = users.iter().filter_map(|u| u.name.as_deref()).collect();
    assert_eq!(
        names,
        ["John Doe", "Jane Doe", "Bam bam", "Peter Piper", "Pan"]
    );

    // /db/deleteone
    assert_eq!(tour::delete_first_user(&client).await?, 1);
    assert_eq!(tour::read_users(&client).await?.len(), 4);

    // /db/jointables
    let report = tour::join_tables(&client).await?;
    assert_eq!(report.users.len(), 2);
    assert_eq!(report.address.len(), 3);
    assert_eq!(report.mapped[0].address, vec!["123 Main St"]);
    assert_eq!(report.mapped[1].address, vec!["456 Main St", "789 Main St"]);
    assert_eq!(report.joint.len(), 3);
    assert_eq!(report.joint2.len(), 3);
    assert_eq!(report.joint[0].address.as_deref(), Some("123 Main St"));
    assert_eq!(report.joint2[2].user_id, 2);

    // /db/modify
    let users = tour::modify_user(&client).await?;
    assert_eq!(users[0].email.as_deref(), Some("johnnyboy@gmail.com"));

    // /builder: the same description executes the same way twice
    let executor = Executor::new(config.clone());
    let list = tour::builder_demo(&executor).await?;
    assert_eq!(list.len(), 2);
    let user2 = qb::get_builder("users").eq("id", 2);
    let first: Vec<User> = executor.execute_as(&user2).await?;
    let second: Vec<User> = executor.execute_as(&user2).await?;
    assert_eq!(first, second);
    assert_eq!(first[0].id, 2);

    // /transaction
    let projection = tour::transaction_demo(&mut client).await?;
    assert_eq!(projection.len(), 4);
    let last = &projection[3];
    assert_eq!(last.user_id, 3);
    assert_eq!(last.address.as_deref(), Some("123 Main St"));

    // A failing body leaves nothing behind.
    let aborted: OrmResult<()> = qbtour::transaction!(&mut client, tx, {
        qb::insert("users").set("name", "Ghost").execute(&tx).await?;
        Err::<(), OrmError>(OrmError::validation("abort"))
    });
    assert!(aborted.unwrap_err().is_validation());
    assert_eq!(tour::read_users(&client).await?.len(), 3);

    // /db/addcolumn works once
    let users = tour::add_details_column(&client).await?;
    assert!(
        users
            .iter()
            .all(|u| u.details.as_deref() == Some("something important"))
    );
    assert!(tour::add_details_column(&client).await.is_err());
    assert_eq!(tour::raw_users(&client).await?.len(), 3);
    assert_eq!(tour::query_users(&client).await?.len(), 3);

    // /db again drops the dependent foreign key along with users
    assert_eq!(tour::recreate_users(&client).await?, vec![1, 2]);
    tour::delete_first_user(&client).await?;
    tour::delete_first_user(&client).await?;
    let err = tour::delete_first_user(&client).await.unwrap_err();
    assert!(err.is_not_found());

    // /db/newtable needs users 1 and 2
    let err = tour::recreate_addresses(&client).await.unwrap_err();
    assert!(matches!(err, OrmError::ForeignKeyViolation(_)));

    tour::recreate_users(&client).await?;
    assert_eq!(
        tour::recreate_addresses(&client).await?,
        "New table created"
    );
    Ok(())
}
