// Test fixture: a small dataset covering every collection.

use crate::dataset::Dataset;

pub const SAMPLE_JSON: &str = r#"{
    "scorecards": [
        {"indicador": "Pobreza", "anio": 2024, "valor": 28.0},
        {"indicador": "Pobreza extrema", "anio": 2024, "valor": 12.7}
    ],
    "seriesHistoricas": [
        {"indicador": "Pobreza", "anio": 2007, "valor": 36.7},
        {"indicador": "Pobreza", "anio": 2010, "valor": 32.8},
        {"indicador": "Pobreza", "anio": 2024, "valor": 28.0},
        {"indicador": "Pobreza extrema", "anio": 2007, "valor": 16.5},
        {"indicador": "Pobreza extrema", "anio": 2024, "valor": 12.7}
    ],
    "pobrezaTableau": [
        {"indicador": "Pobreza", "nivel": "Nacional", "ano": 2022, "valor": 25.2},
        {"indicador": "Pobreza", "nivel": "Urbano", "ano": 2022, "valor": 17.8},
        {"indicador": "Pobreza", "nivel": "Rural", "ano": 2022, "valor": 42.9},
        {"indicador": "Pobreza", "nivel": "Nacional", "ano": 2023, "valor": 26.0},
        {"indicador": "Pobreza", "nivel": "Urbano", "ano": 2023, "valor": 18.0},
        {"indicador": "Pobreza", "nivel": "Rural", "ano": 2023, "valor": 46.4},
        {"indicador": "Pobreza Extrema", "nivel": "Nacional", "ano": 2022, "valor": 8.2},
        {"indicador": "Pobreza Extrema", "nivel": "Nacional", "ano": 2023, "valor": 9.8},
        {"indicador": "Pobreza Extrema", "nivel": "Rural", "ano": 2023, "valor": 20.0},
        {"indicador": "NBI", "nivel": "Nacional", "ano": 2022, "valor": 31.0},
        {"indicador": "NBI", "nivel": "Nacional", "ano": 2023, "valor": 30.5},
        {"indicador": "NBI", "nivel": "Nacional", "ano": "2024", "valor": null}
    ],
    "pobrezaSexoEtnia": [
        {"tipoGrupo": "sexo", "grupo": "Hombre", "indicador": "Pobreza", "anio": 2022, "valor": 25.0},
        {"tipoGrupo": "sexo", "grupo": "Mujer", "indicador": "Pobreza", "anio": 2022, "valor": 25.4},
        {"tipoGrupo": "sexo", "grupo": "Hombre", "indicador": "Pobreza", "anio": 2023, "valor": 25.5},
        {"tipoGrupo": "sexo", "grupo": "Mujer", "indicador": "Pobreza", "anio": 2023, "valor": 26.5},
        {"tipoGrupo": "sexo", "grupo": "Hombre", "indicador": "Pobreza extrema", "anio": 2023, "valor": 9.5},
        {"tipoGrupo": "etnia", "grupo": "Mestizo", "indicador": "Pobreza", "anio": 2023, "valor": 22.0},
        {"tipoGrupo": "etnia", "grupo": "Indígena", "indicador": "Pobreza", "anio": 2023, "valor": 52.0},
        {"tipoGrupo": "etnia", "grupo": "Montubio", "indicador": "Pobreza", "anio": 2023, "valor": 40.1},
        {"tipoGrupo": "etnia", "grupo": "Blanco", "indicador": "Pobreza", "anio": 2022, "valor": 15.0},
        {"tipoGrupo": "etnia", "grupo": "Afroecuatoriano", "indicador": "Pobreza", "anio": 2023, "valor": null}
    ],
    "pobrezaEducacion": [
        {"nivelEducativo": "Superior", "indicador": "Pobreza", "anio": 2023, "valor": 8.0},
        {"nivelEducativo": "Menos que superior", "indicador": "Pobreza", "anio": 2023, "valor": 30.0},
        {"nivelEducativo": "Superior", "indicador": "Pobreza extrema", "anio": 2023, "valor": 1.5}
    ],
    "pobrezaEdad": [
        {"grupoEtario": "Niños (0-17)", "indicador": "Pobreza", "anio": 2023, "valor": 33.0},
        {"grupoEtario": "Adultos mayores (65+)", "indicador": "Pobreza", "anio": 2023, "valor": 28.0}
    ],
    "pobrezaRegion": [
        {"region": "Costa", "indicador": "Pobreza", "anio": 2022, "valor": 27.0},
        {"region": "Costa", "indicador": "Pobreza", "anio": 2023, "valor": 29.0},
        {"region": "Sierra", "indicador": "Pobreza", "anio": 2023, "valor": 20.0},
        {"region": "Oriente", "indicador": "Pobreza", "anio": 2023, "valor": 40.0}
    ],
    "pobrezaProvincial": [
        {"provincia": "Guayas", "indicador": "Pobreza", "anio": 2022, "valor": 20.0},
        {"provincia": "Guayas", "indicador": "Pobreza extrema", "anio": 2022, "valor": 5.0},
        {"provincia": "Guayas", "indicador": "Pobreza", "anio": 2023, "valor": 22.0},
        {"provincia": "Guayas", "indicador": "Pobreza extrema", "anio": 2023, "valor": 6.0},
        {"provincia": "Morona Santiago", "indicador": "Pobreza", "anio": 2023, "valor": 50.0},
        {"provincia": "Morona Santiago", "indicador": "Pobreza extrema", "anio": 2023, "valor": 30.0},
        {"provincia": "Galápagos", "indicador": "Pobreza extrema", "anio": 2023, "valor": 1.0},
        {"provincia": "Azuay", "indicador": "Pobreza", "anio": 2023, "valor": 15.0}
    ],
    "pobrezaMultidimensionalScorecard": [
        {"indicador": "Pobreza Multidimensional", "anio": 2023, "valor": 38.1},
        {"indicador": "Pobreza Extrema Multidimensional", "anio": 2023, "valor": 15.0}
    ],
    "pobrezaMultidimensionalSeries": [
        {"indicador": "Pobreza Multidimensional", "anio": 2009, "valor": 51.0},
        {"indicador": "Pobreza Multidimensional", "anio": 2010, "valor": 46.1},
        {"indicador": "Pobreza Multidimensional", "anio": 2023, "valor": 38.1}
    ],
    "variacionPobrezaSignificancia": [
        {"anio": 2023, "indicador": "Pobreza", "valor": 26.0, "valorAnterior": 25.2, "variacionPp": 0.8, "significativo": "No"}
    ],
    "empleoSeries": [
        {"indicador": "Empleo adecuado", "anio": 2022, "valor": 36.0},
        {"indicador": "Desempleo", "anio": 2022, "valor": 4.1},
        {"indicador": "Empleo adecuado", "anio": 2023, "valor": 35.9},
        {"indicador": "Desempleo", "anio": 2023, "valor": 3.4},
        {"indicador": "Empleo no adecuado", "anio": 2023, "valor": 60.0}
    ],
    "empleoScorecard": [
        {"indicador": "Empleo no adecuado", "anio": 2024, "valor": 60.2},
        {"indicador": "Desempleo", "anio": 2024, "valor": 3.7}
    ],
    "empleoDemografico": [
        {"tipoCategoria": "sexo", "categoria": "Hombre", "anio": 2022, "empleoAdecuado": 41.0},
        {"tipoCategoria": "sexo", "categoria": "Mujer", "anio": 2023, "empleoAdecuado": 28.0},
        {"tipoCategoria": "sexo", "categoria": "Hombre", "anio": 2023, "empleoAdecuado": 42.0},
        {"tipoCategoria": "area", "categoria": "Urbana", "anio": 2023, "empleoAdecuado": 45.0},
        {"tipoCategoria": "area", "categoria": "Rural", "anio": 2023, "empleoAdecuado": null}
    ],
    "variacionEmpleoSignificancia": [
        {"anio": 2022, "indicador": "Desempleo", "valor": 4.1, "valorAnterior": 4.2, "variacionPp": -0.1, "significativo": "No"},
        {"anio": 2023, "indicador": "Empleo adecuado", "valor": 35.9, "valorAnterior": 36.0, "variacionPp": -0.1, "significativo": "Sí (95%)"},
        {"anio": 2023, "indicador": "Desempleo", "valor": 3.4, "valorAnterior": 4.1, "variacionPp": -0.7, "significativo": "Marginal"}
    ],
    "iessAfiliados": [
        {"anio": 2022, "afiliados": 3400000},
        {"anio": 2023, "afiliados": 3550000}
    ],
    "crecimientoEmpleoSector": [
        {"sector": "Comercio", "anio": 2019, "empleoMiles": 100.0},
        {"sector": "Comercio", "anio": 2023, "empleoMiles": 120.0},
        {"sector": "Construcción", "anio": 2019, "empleoMiles": 50.0},
        {"sector": "Construcción", "anio": 2023, "empleoMiles": 45.0},
        {"sector": "Turismo", "anio": 2023, "empleoMiles": 30.0},
        {"sector": "Minería", "anio": 2019, "empleoMiles": 0.0},
        {"sector": "Minería", "anio": 2023, "empleoMiles": 5.0}
    ],
    "salariosSeries": [
        {"tipo": "Salario básico", "anio": 2022, "valor": 425.0},
        {"tipo": "Salario básico", "anio": 2023, "valor": 450.0},
        {"tipo": "Salario promedio", "anio": 2023, "valor": 520.0}
    ],
    "brechasSalariales": {
        "educacion": [
            {"anio": 2022, "nivelEducativo": "Superior", "salarioPromedio": 800.0},
            {"anio": 2023, "nivelEducativo": "Superior", "salarioPromedio": 850.0},
            {"anio": 2023, "nivelEducativo": "Secundaria", "salarioPromedio": 480.0}
        ],
        "genero": [
            {"anio": 2023, "sexo": "Hombre", "salarioPromedio": 560.0},
            {"anio": 2023, "sexo": "Mujer", "salarioPromedio": 470.0}
        ]
    },
    "decilesIngresoAnual": [
        {"anio": 2019, "decil": 1, "ingresoPromedio": 1000.0},
        {"anio": 2021, "decil": 1, "ingresoPromedio": 1210.0},
        {"anio": 2019, "decil": 2, "ingresoPromedio": 2000.0},
        {"anio": 2021, "decil": 2, "ingresoPromedio": 2000.0},
        {"anio": 2021, "decil": 3, "ingresoPromedio": 3000.0}
    ],
    "crecimientoDemografico": [
        {"dimension": "Sexo", "categoria": "Hombre", "ingreso": 600.0},
        {"dimension": "Sexo", "categoria": "Mujer", "ingreso": 480.0},
        {"dimension": "Área", "categoria": "Rural", "ingreso": null}
    ],
    "giniPanel": [
        {"categoria": "Ecuador", "ano": 2022, "valor": 0.466},
        {"categoria": "Ecuador", "ano": 2023, "valor": 0.455},
        {"categoria": "Ecuador (Urbano)", "ano": 2023, "valor": 0.44},
        {"categoria": "LAC", "ano": 2023, "valor": 0.50}
    ],
    "giniTaxImpact": [
        {"categoria": "Gini antes de impuestos", "anio": 2021, "gini": 0.48},
        {"categoria": "Gini después de IR", "anio": 2021, "gini": 0.47}
    ],
    "giniLacComparison": [
        {"pais": "Ecuador", "ano": 2020, "gini": 0.47},
        {"pais": "Chile", "ano": 2020, "gini": 0.45},
        {"pais": "Brazil", "ano": 2020, "gini": 0.52},
        {"pais": "Argentina", "ano": 2020, "gini": 0.42}
    ],
    "sriPercentilesIngreso": [
        {"percentil": "P50 (Mediana)", "anio": 2022, "ingresoMensualNominal": 600.0},
        {"percentil": "P99", "anio": 2022, "ingresoMensualNominal": 9000.0}
    ],
    "widIngresoPercentiles": [
        {"percentil": "Top 1%", "ano": 2020, "participacionEnElIngresoNacional(%)": 15.0},
        {"percentil": "Top 1%", "ano": 2021, "participacionEnElIngresoNacional(%)": 15.5},
        {"percentil": "Bottom 50%", "ano": 2021, "participacionEnElIngresoNacional(%)": 14.0}
    ],
    "widRiquezaPercentiles": [
        {"percentil": "Top 1%", "ano": 2021, "participacionEnLaRiquezaNacional(%)": 30.0}
    ],
    "widIngresoPercentilesALC": [
        {"pais": "Ecuador", "percentil": "Top 1%", "ano": 1975, "participacionEnElIngresoNacional(%)": 12.0},
        {"pais": "Ecuador", "percentil": "Top 1%", "ano": 2020, "participacionEnElIngresoNacional(%)": 15.0},
        {"pais": "Chile", "percentil": "Top 1%", "ano": 2020, "participacionEnElIngresoNacional(%)": 23.0},
        {"pais": "Ecuador", "percentil": "Top 10%", "ano": 2020, "participacionEnElIngresoNacional(%)": 45.0}
    ],
    "widRiquezaPercentilesALC": [
        {"pais": "Ecuador", "percentil": "Top 1%", "ano": 2020, "participacionEnLaRiquezaNacional(%)": 30.0}
    ],
    "poblacionPercentiles": [
        {"percentil": "Top 1%", "anio": 2023, "poblacion": 180000},
        {"percentil": "Top 10%", "anio": 2023, "poblacion": 1800000}
    ],
    "tributacionGraficos": {
        "grafico16Composicion": [
            {"tipoImpuesto": "IVA", "anio": 2020, "porcentajePib": 6.0},
            {"tipoImpuesto": "IVA", "anio": 2021, "porcentajePib": 6.5},
            {"tipoImpuesto": "Renta", "anio": 2020, "porcentajePib": 4.0}
        ],
        "grafico17Carga": [
            {"decil": 2, "anio": 2021, "cargaTributariaPct": 10.0},
            {"decil": 1, "anio": 2021, "cargaTributariaPct": 12.0},
            {"decil": 1, "anio": 2020, "cargaTributariaPct": 11.0}
        ]
    }
}"#;

pub fn sample_dataset() -> Dataset {
    Dataset::from_json_str(SAMPLE_JSON).expect("sample dataset parses")
}
