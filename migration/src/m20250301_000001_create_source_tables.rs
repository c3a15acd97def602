//! Development schema of the read-only TVETMIS source tables.
//!
//! Production databases already hold these tables; this migration only
//! recreates their shape for local runs and tests. Date columns are stored
//! as text, the same way the source exports them.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Clone, Copy)]
enum Kind {
    Text,
    Int,
    Real,
}

use Kind::{Int, Real, Text};

const TVET15M: (&str, &[(&str, Kind)]) = (
    "tvet15m",
    &[
        ("school_name", Text),
        ("apply_major_name", Text),
        ("gender", Text),
        ("date_of_birth", Text),
        ("address_city_province_name", Text),
        ("has_job", Int),
        ("shift_name", Text),
        ("scholarship_status", Int),
        ("rtimeline_created_at", Text),
        ("average_attendance", Real),
        ("income", Real),
        ("position", Text),
    ],
);

const TVET15M_DATA: (&str, &[(&str, Kind)]) = ("tvet15m_data", &[("province_name", Text)]);

const TVETSMS_DATA: (&str, &[(&str, Kind)]) = (
    "tvetsms_data",
    &[
        ("school_name", Text),
        ("sector_name", Text),
        ("apply_major_name", Text),
        ("gender", Text),
        ("date_of_birth", Text),
        ("address_city_provinces", Text),
        ("status", Int),
        ("marital_status", Int),
    ],
);

const TVET_STAFF: (&str, &[(&str, Kind)]) = (
    "tvet_staff",
    &[
        ("gender", Text),
        ("role_name", Text),
        ("status", Int),
        ("date_of_birth", Text),
        ("address_city_provinces", Text),
    ],
);

const SCHOOL_STAFF: (&str, &[(&str, Kind)]) = (
    "school_staff",
    &[
        ("schools_name", Text),
        ("gender", Text),
        ("role_name", Text),
        ("status", Int),
        ("is_teaching", Int),
        ("start_work_at", Text),
        ("date_of_birth", Text),
        ("address_city_provinces", Text),
        ("employment_type_name", Text),
    ],
);

const DEVELOPMENT_PARTNERS: (&str, &[(&str, Kind)]) = (
    "development_partners",
    &[
        ("city_province_name", Text),
        ("school_name", Text),
        ("type_development_partners", Text),
        ("business", Text),
        ("status", Int),
    ],
);

const STUDENT_INTERNSHIPS: (&str, &[(&str, Kind)]) = (
    "student_internships_15m",
    &[
        ("province_name", Text),
        ("school_name", Text),
        ("gender", Text),
        ("poverty_status", Text),
        ("internship_pass_fail", Int),
        ("partner_type", Int),
        ("partner_name", Text),
        ("major_name", Text),
    ],
);

const ERPL_CANDIDATE: (&str, &[(&str, Kind)]) = (
    "erpl_candidate",
    &[
        ("gender", Text),
        ("date_of_birth", Text),
        ("marital_status", Text),
        ("verified", Int),
        ("address_city_provinces", Text),
    ],
);

const SOURCE_TABLES: [(&str, &[(&str, Kind)]); 8] = [
    TVET15M,
    TVET15M_DATA,
    TVETSMS_DATA,
    TVET_STAFF,
    SCHOOL_STAFF,
    DEVELOPMENT_PARTNERS,
    STUDENT_INTERNSHIPS,
    ERPL_CANDIDATE,
];

fn create_statement(name: &str, columns: &[(&str, Kind)]) -> TableCreateStatement {
    let mut table = Table::create();
    table.table(Alias::new(name)).if_not_exists().col(
        ColumnDef::new(Alias::new("id"))
            .big_integer()
            .not_null()
            .auto_increment()
            .primary_key(),
    );
    for (column, kind) in columns {
        let mut def = ColumnDef::new(Alias::new(*column));
        match kind {
            Kind::Text => def.string(),
            Kind::Int => def.big_integer(),
            Kind::Real => def.double(),
        };
        table.col(def.null());
    }
    table.to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for (name, columns) in SOURCE_TABLES {
            manager.create_table(create_statement(name, columns)).await?;
        }
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for (name, _) in SOURCE_TABLES.iter().rev() {
            manager
                .drop_table(Table::drop().table(Alias::new(*name)).to_owned())
                .await?;
        }
        Ok(())
    }
}
